//! Motor hardware configuration
//!
//! Passed through [`EncoderMotor::set_config`](crate::traits::EncoderMotor::set_config)
//! to whatever drives the physical motor controller.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed-loop gains and encoder scaling for one motor controller
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotorConfig {
    /// Proportional gain on velocity error
    pub kp: f64,
    /// Integral gain on velocity error
    pub ki: f64,
    /// Derivative gain on velocity error
    pub kd: f64,
    /// Feed-forward gain (output fraction per unit of target velocity)
    pub kf: f64,
    /// Distance travelled per encoder count
    pub distance_per_count: f64,
    /// Output magnitude limit for the velocity loop (0-1)
    pub max_output: f64,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
            kf: 0.0,
            distance_per_count: 1.0,
            max_output: 1.0,
        }
    }
}

impl MotorConfig {
    /// Feed-forward only configuration
    pub const fn feed_forward(kf: f64, distance_per_count: f64) -> Self {
        Self {
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
            kf,
            distance_per_count,
            max_output: 1.0,
        }
    }

    /// Replace the PID gains, keeping the rest
    pub const fn with_pid(mut self, kp: f64, ki: f64, kd: f64) -> Self {
        self.kp = kp;
        self.ki = ki;
        self.kd = kd;
        self
    }

    /// Check if any feedback gain is non-zero
    pub fn has_feedback(&self) -> bool {
        self.kp != 0.0 || self.ki != 0.0 || self.kd != 0.0
    }
}
