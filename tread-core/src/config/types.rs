//! Configuration type definitions
//!
//! Tuning parameters for the shaping, position and drive controllers.
//! These are created once at start-up and may be persisted with
//! [`StoredDriveConfig`](super::StoredDriveConfig).

use crate::traits::{Axis, Button};

use super::error::{ensure_finite, ConfigError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default joystick dead band
pub const DEFAULT_CONTROLLER_DEAD_BAND: f64 = 0.2;

/// Default joystick shaping exponent
pub const DEFAULT_CONTROLLER_POWER: u32 = 2;

/// Default control tick rate (Hz)
pub const DEFAULT_TICK_RATE_HZ: f64 = 50.0;

/// Dead band and power curve applied to a raw axis
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShapingParameters {
    /// Magnitudes below this read as zero, in [0, 1)
    pub dead_band: f64,
    /// Exponent applied to the rescaled magnitude
    pub power: u32,
}

impl Default for ShapingParameters {
    fn default() -> Self {
        Self {
            dead_band: DEFAULT_CONTROLLER_DEAD_BAND,
            power: DEFAULT_CONTROLLER_POWER,
        }
    }
}

impl ShapingParameters {
    pub const fn new(dead_band: f64, power: u32) -> Self {
        Self { dead_band, power }
    }

    /// Check the dead band and exponent
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite(&[self.dead_band])?;
        if !(0.0..1.0).contains(&self.dead_band) {
            return Err(ConfigError::InvalidDeadBand);
        }
        if self.power == 0 {
            return Err(ConfigError::InvalidPower);
        }
        Ok(())
    }
}

/// Parameters for a [`PositionController`](crate::motion::PositionController)
///
/// The ramp runs linearly from `min_speed` at `dead_band` distance up to
/// `max_speed`, climbing by `slow_rate` per unit of distance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionControlConfig {
    /// Position to reach
    pub target: f64,
    /// Output increase per unit of distance inside the ramp
    pub slow_rate: f64,
    /// Distance from target treated as on-target
    pub dead_band: f64,
    /// Output at the inner edge of the ramp
    pub min_speed: f64,
    /// Output outside the ramp
    pub max_speed: f64,
}

impl PositionControlConfig {
    pub const fn new(
        target: f64,
        slow_rate: f64,
        dead_band: f64,
        min_speed: f64,
        max_speed: f64,
    ) -> Self {
        Self {
            target,
            slow_rate,
            dead_band,
            min_speed,
            max_speed,
        }
    }

    /// Reject parameters that would give a degenerate or non-finite ramp
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite(&[
            self.target,
            self.slow_rate,
            self.dead_band,
            self.min_speed,
            self.max_speed,
        ])?;
        if self.dead_band <= 0.0 {
            return Err(ConfigError::InvalidDeadBand);
        }
        if self.max_speed <= 0.0 {
            return Err(ConfigError::InvalidMaxSpeed);
        }
        if self.slow_rate <= 0.0 {
            return Err(ConfigError::InvalidSlowRate);
        }
        // slow_start > dead_band only holds for a non-empty speed range
        if self.min_speed >= self.max_speed {
            return Err(ConfigError::InvalidSpeedRange);
        }
        Ok(())
    }
}

/// Which operator controls drive the train
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriveBindings {
    /// Forward/back axis (pushing the stick away reads negative)
    pub forward_back: Axis,
    /// Rotation axis
    pub rotate: Axis,
    /// Press to switch to closed-loop velocity control
    pub closed_loop: Button,
    /// Press to switch to open-loop percent output
    pub open_loop: Button,
}

impl Default for DriveBindings {
    fn default() -> Self {
        Self {
            forward_back: Axis::LeftY,
            rotate: Axis::RightX,
            closed_loop: Button::Start,
            open_loop: Button::Back,
        }
    }
}

/// Drive train configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriveTrainConfig {
    /// Velocity clamp bound
    pub max_speed: f64,
    /// Multiplier from mixed axis value to commanded velocity
    pub controller_scale: f64,
    /// Joystick dead band
    pub controller_dead_band: f64,
    /// Joystick shaping exponent
    pub controller_power: u32,
    /// Start in closed-loop velocity mode
    pub use_closed_loop: bool,
    /// Acceleration limit for the per-side rate limiters (velocity units/s)
    pub max_acceleration: f64,
    /// Rate at which the control cycle runs
    ///
    /// Rate limiter steps are derived from this; changing the tick rate
    /// without updating it changes the physical acceleration limit.
    pub tick_rate_hz: f64,
    /// Axis and button bindings
    pub bindings: DriveBindings,
}

impl DriveTrainConfig {
    /// Create a config whose velocity clamp equals the controller scale
    pub fn new(controller_scale: f64, max_acceleration: f64) -> Self {
        Self {
            max_speed: controller_scale,
            controller_scale,
            controller_dead_band: DEFAULT_CONTROLLER_DEAD_BAND,
            controller_power: DEFAULT_CONTROLLER_POWER,
            use_closed_loop: true,
            max_acceleration,
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            bindings: DriveBindings::default(),
        }
    }

    /// Shaping applied to both drive axes
    pub fn shaping(&self) -> ShapingParameters {
        ShapingParameters::new(self.controller_dead_band, self.controller_power)
    }

    /// Rate limiter step per tick
    pub fn max_change_per_tick(&self) -> f64 {
        self.max_acceleration / self.tick_rate_hz
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite(&[
            self.max_speed,
            self.controller_scale,
            self.max_acceleration,
            self.tick_rate_hz,
        ])?;
        if self.max_speed <= 0.0 {
            return Err(ConfigError::InvalidMaxSpeed);
        }
        if self.controller_scale <= 0.0 {
            return Err(ConfigError::InvalidScale);
        }
        if self.max_acceleration <= 0.0 {
            return Err(ConfigError::InvalidAcceleration);
        }
        if self.tick_rate_hz <= 0.0 {
            return Err(ConfigError::InvalidTickRate);
        }
        self.shaping().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shaping_validation() {
        assert!(ShapingParameters::default().validate().is_ok());
        assert!(ShapingParameters::new(0.0, 1).validate().is_ok());
        assert_eq!(
            ShapingParameters::new(1.0, 2).validate(),
            Err(ConfigError::InvalidDeadBand)
        );
        assert_eq!(
            ShapingParameters::new(-0.1, 2).validate(),
            Err(ConfigError::InvalidDeadBand)
        );
        assert_eq!(
            ShapingParameters::new(0.2, 0).validate(),
            Err(ConfigError::InvalidPower)
        );
        assert_eq!(
            ShapingParameters::new(f64::NAN, 2).validate(),
            Err(ConfigError::NonFinite)
        );
    }

    #[test]
    fn test_position_config_validation() {
        let good = PositionControlConfig::new(10.0, 2.0, 1.0, 0.1, 1.0);
        assert!(good.validate().is_ok());

        let cases = [
            (
                PositionControlConfig { dead_band: 0.0, ..good },
                ConfigError::InvalidDeadBand,
            ),
            (
                PositionControlConfig { max_speed: 0.0, ..good },
                ConfigError::InvalidMaxSpeed,
            ),
            (
                PositionControlConfig { slow_rate: 0.0, ..good },
                ConfigError::InvalidSlowRate,
            ),
            (
                PositionControlConfig { min_speed: 1.0, ..good },
                ConfigError::InvalidSpeedRange,
            ),
            (
                PositionControlConfig { target: f64::INFINITY, ..good },
                ConfigError::NonFinite,
            ),
        ];

        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn test_drive_config_defaults() {
        let config = DriveTrainConfig::new(5.0, 10.0);
        assert_eq!(config.max_speed, 5.0);
        assert_eq!(config.controller_scale, 5.0);
        assert_eq!(config.controller_dead_band, 0.2);
        assert_eq!(config.controller_power, 2);
        assert!(config.use_closed_loop);
        assert_eq!(config.bindings.forward_back, Axis::LeftY);
        assert_eq!(config.bindings.rotate, Axis::RightX);
        assert_eq!(config.bindings.closed_loop, Button::Start);
        assert_eq!(config.bindings.open_loop, Button::Back);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_change_per_tick() {
        let config = DriveTrainConfig::new(5.0, 10.0);
        assert!((config.max_change_per_tick() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_drive_config_validation() {
        let good = DriveTrainConfig::new(5.0, 10.0);

        assert_eq!(
            DriveTrainConfig { max_speed: -1.0, ..good }.validate(),
            Err(ConfigError::InvalidMaxSpeed)
        );
        assert_eq!(
            DriveTrainConfig { controller_scale: 0.0, ..good }.validate(),
            Err(ConfigError::InvalidScale)
        );
        assert_eq!(
            DriveTrainConfig { tick_rate_hz: 0.0, ..good }.validate(),
            Err(ConfigError::InvalidTickRate)
        );
        assert_eq!(
            DriveTrainConfig { max_acceleration: 0.0, ..good }.validate(),
            Err(ConfigError::InvalidAcceleration)
        );
        assert_eq!(
            DriveTrainConfig { controller_dead_band: 1.5, ..good }.validate(),
            Err(ConfigError::InvalidDeadBand)
        );
    }
}
