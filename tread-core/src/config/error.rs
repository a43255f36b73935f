//! Configuration errors
//!
//! Returned by the `try_new` constructors and by configuration persistence.
//! Runtime command paths never fail; they clamp instead.

use core::fmt;

/// Reasons a configuration is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A parameter was NaN or infinite
    NonFinite,
    /// Dead band outside its valid range
    InvalidDeadBand,
    /// Maximum speed must be strictly positive
    InvalidMaxSpeed,
    /// Slow-down rate must be strictly positive
    InvalidSlowRate,
    /// Minimum speed must be below maximum speed
    InvalidSpeedRange,
    /// Shaping exponent must be at least 1
    InvalidPower,
    /// Axis-to-velocity scale must be strictly positive
    InvalidScale,
    /// Control tick rate must be strictly positive
    InvalidTickRate,
    /// Acceleration limit must be strictly positive
    InvalidAcceleration,
    /// Rate limiter step must be strictly positive
    InvalidRateStep,
    /// Rate limiter start magnitude must not be negative
    InvalidRateStart,
    /// Fixed output fraction must be in (0, 1]
    InvalidOutput,
    /// Encoding into the output buffer failed
    Serialize,
    /// Stored bytes could not be decoded
    Deserialize,
    /// Stored record does not carry the expected magic number
    BadMagic,
    /// Stored record was written by an incompatible version
    VersionMismatch,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::NonFinite => "parameter is not finite",
            ConfigError::InvalidDeadBand => "dead band out of range",
            ConfigError::InvalidMaxSpeed => "max speed must be positive",
            ConfigError::InvalidSlowRate => "slow rate must be positive",
            ConfigError::InvalidSpeedRange => "min speed must be below max speed",
            ConfigError::InvalidPower => "shaping power must be at least 1",
            ConfigError::InvalidScale => "controller scale must be positive",
            ConfigError::InvalidTickRate => "tick rate must be positive",
            ConfigError::InvalidAcceleration => "max acceleration must be positive",
            ConfigError::InvalidRateStep => "rate limiter step must be positive",
            ConfigError::InvalidRateStart => "rate limiter start must not be negative",
            ConfigError::InvalidOutput => "output must be in (0, 1]",
            ConfigError::Serialize => "failed to encode configuration",
            ConfigError::Deserialize => "failed to decode configuration",
            ConfigError::BadMagic => "configuration magic mismatch",
            ConfigError::VersionMismatch => "configuration version mismatch",
        };
        f.write_str(msg)
    }
}

/// Check that every value is finite
pub(crate) fn ensure_finite(values: &[f64]) -> Result<(), ConfigError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::NonFinite)
    }
}
