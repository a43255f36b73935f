//! Operator-driven mechanisms
//!
//! Single-purpose actuators run alongside the drive, each as a
//! [`Subsystem`](crate::traits::Subsystem).

pub mod intake;
pub mod shooter;

pub use intake::{Intake, IntakeConfig, DEFAULT_SPINNER_OUTPUT};
pub use shooter::{Shooter, ShooterConfig, ShooterState, DEFAULT_SHOOT_OUTPUT};

use crate::config::ConfigError;

/// Check a fixed output fraction is usable as a command
pub(crate) fn validate_output(output: f64) -> Result<(), ConfigError> {
    if !output.is_finite() {
        return Err(ConfigError::NonFinite);
    }
    if output <= 0.0 || output > 1.0 {
        return Err(ConfigError::InvalidOutput);
    }
    Ok(())
}
