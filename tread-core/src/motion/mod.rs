//! Motion control primitives
//!
//! Joystick shaping, per-tick rate limiting and position control with
//! completion hysteresis.

pub mod position;
pub mod rate;
pub mod shaping;

pub use position::{PositionController, PositionState, HIT_COUNT_NEEDED};
pub use rate::RateLimiter;
pub use shaping::shape;
