//! Board-agnostic motion-control core for a differential drive
//!
//! This crate contains all control logic that does not depend on specific
//! hardware:
//!
//! - Hardware and scheduler abstraction traits (motor, solenoid, operator input)
//! - Joystick shaping and per-tick rate limiting
//! - Position control with completion hysteresis
//! - Two-sided drive controller with closed/open-loop modes
//! - Shooter and intake mechanisms
//! - Command safety clamps
//! - Configuration type definitions and persistence
//!
//! # Features
//!
//! - `defmt`: `Format` derives and state-change logging
//! - `serde`: serde derives on configuration types and postcard
//!   persistence (`config::store`)
//! - `mock`: test doubles for downstream crates
//!
//! The persistence tests need the `serde` feature:
//!
//! ```text
//! cargo test -p tread-core --features serde
//! ```
//!
//! A plain `cargo test --workspace` enables it through the drivers crate's
//! dev-dependencies.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod drive;
pub mod mechanism;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod motion;
pub mod safety;
pub mod traits;
