//! Operator input implementations

pub mod gamepad;

pub use gamepad::{Gamepad, GamepadSample};
