//! Command limits
//!
//! Every command forwarded to a drive motor passes through one of these
//! clamps first.
//!
//! The clamps use plain comparisons, so a NaN request fails both tests and
//! is returned unchanged. `f64::clamp`/`min`/`max` would behave differently
//! (`max` drops NaN, `clamp` keeps it but panics on bad bounds).

/// Maximum open-loop output magnitude
pub const MAX_PERCENT_OUTPUT: f64 = 1.0;

/// Clamp a value to [-limit, limit]
#[inline]
pub fn clamp_symmetric(value: f64, limit: f64) -> f64 {
    if value > limit {
        limit
    } else if value < -limit {
        -limit
    } else {
        value
    }
}

/// Clamp a velocity request to [-max_speed, max_speed]
#[inline]
pub fn safe_velocity(velocity: f64, max_speed: f64) -> f64 {
    clamp_symmetric(velocity, max_speed)
}

/// Clamp an output fraction to [-1, 1]
#[inline]
pub fn safe_percent(percent: f64) -> f64 {
    clamp_symmetric(percent, MAX_PERCENT_OUTPUT)
}
