//! Safety limits
//!
//! Clamps applied to every motor command.

pub mod limits;

pub use limits::{clamp_symmetric, safe_percent, safe_velocity, MAX_PERCENT_OUTPUT};
