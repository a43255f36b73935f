//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tread-core:
//!
//! - Motors: PWM H-bridge motor with encoder feedback, leader/follower pair
//! - Solenoids: double-acting valve on two GPIO pins
//! - Operator input: gamepad state with edge-triggered button presses

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod input;
pub mod motor;
pub mod solenoid;
