//! Motor driver trait
//!
//! An encoder-equipped motor that accepts either a velocity setpoint
//! (closed loop, run by the motor controller) or a raw output fraction
//! (open loop).
//!
//! Callers pass values that are already clamped. Any hardware fault
//! handling belongs to the implementation; none of these methods report
//! failure.

use crate::config::MotorConfig;

/// Motor with velocity/percent control and an encoder
pub trait EncoderMotor {
    /// Command a velocity setpoint in distance units per second
    fn set_velocity(&mut self, velocity: f64);

    /// Command an output fraction in [-1, 1]
    fn set_percent_output(&mut self, percent: f64);

    /// Measured velocity in distance units per second
    fn get_velocity(&self) -> f64;

    /// Distance travelled since the last reset
    fn get_distance(&self) -> f64;

    /// Output fraction currently applied
    fn get_output_percent(&self) -> f64;

    /// Set whether positive commands turn the motor backwards
    fn set_inverted(&mut self, inverted: bool);

    /// Flip the current inversion
    fn invert(&mut self);

    /// Zero the distance counter
    fn reset_distance(&mut self);

    /// Apply gains and encoder scaling
    fn set_config(&mut self, config: &MotorConfig);
}
