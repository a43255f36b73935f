//! Two-wheel shooter
//!
//! Both wheels spin at a fixed output fraction while the fire button is
//! held and stop as soon as it is released. A disabled shooter holds both
//! wheels at zero regardless of input.

use crate::config::ConfigError;
use crate::drive::{Telemetry, TelemetryValue};
use crate::safety::safe_percent;
use crate::traits::{Button, EncoderMotor, OperatorInput, Subsystem};

use super::validate_output;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wheel output while firing
pub const DEFAULT_SHOOT_OUTPUT: f64 = 0.5;

/// Shooter tuning and binding
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShooterConfig {
    /// Output fraction applied to both wheels while firing, in (0, 1]
    pub output: f64,
    /// Hold to fire
    pub fire: Button,
}

impl Default for ShooterConfig {
    fn default() -> Self {
        Self {
            output: DEFAULT_SHOOT_OUTPUT,
            fire: Button::X,
        }
    }
}

impl ShooterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_output(self.output)
    }
}

/// Whether the shooter responds to input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShooterState {
    /// Wheels held at zero
    Disabled,
    /// Wheels follow the fire button
    #[default]
    Controlled,
}

/// Shooter over two wheel motors
pub struct Shooter<L, R> {
    left_motor: L,
    right_motor: R,
    config: ShooterConfig,
    state: ShooterState,
    /// Last output sent to both wheels
    output: f64,
}

impl<L: EncoderMotor, R: EncoderMotor> Shooter<L, R> {
    /// Create a shooter, panicking on an invalid configuration
    pub fn new(left_motor: L, right_motor: R, config: ShooterConfig) -> Self {
        match Self::try_new(left_motor, right_motor, config) {
            Ok(shooter) => shooter,
            Err(e) => panic!("invalid shooter config: {}", e),
        }
    }

    pub fn try_new(
        left_motor: L,
        right_motor: R,
        config: ShooterConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            left_motor,
            right_motor,
            config,
            state: ShooterState::default(),
            output: 0.0,
        })
    }

    /// Run one control tick
    pub fn control<I: OperatorInput + ?Sized>(&mut self, input: &I) {
        let output = match self.state {
            ShooterState::Disabled => 0.0,
            ShooterState::Controlled if input.button_down(self.config.fire) => {
                self.config.output
            }
            ShooterState::Controlled => 0.0,
        };
        self.set_output(output);
    }

    fn set_output(&mut self, output: f64) {
        let output = safe_percent(output);
        self.output = output;
        self.left_motor.set_percent_output(output);
        self.right_motor.set_percent_output(output);
    }

    /// Switch state; disabling stops the wheels immediately
    pub fn set_state(&mut self, state: ShooterState) {
        if state != self.state {
            #[cfg(feature = "defmt")]
            defmt::info!("shooter {} -> {}", self.state, state);
            self.state = state;
        }
        if state == ShooterState::Disabled {
            self.set_output(0.0);
        }
    }

    pub fn state(&self) -> ShooterState {
        self.state
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn config(&self) -> &ShooterConfig {
        &self.config
    }

    pub fn left_motor(&self) -> &L {
        &self.left_motor
    }

    pub fn right_motor(&self) -> &R {
        &self.right_motor
    }

    pub fn telemetry(&self) -> Telemetry {
        let mut telemetry = Telemetry::new();
        let _ = telemetry.insert("output", TelemetryValue::from(self.output));
        let _ = telemetry.insert(
            "enabled",
            TelemetryValue::from(self.state == ShooterState::Controlled),
        );
        telemetry
    }
}

impl<L, R, I> Subsystem<I> for Shooter<L, R>
where
    L: EncoderMotor,
    R: EncoderMotor,
    I: OperatorInput,
{
    fn name(&self) -> &'static str {
        "shooter"
    }

    fn control(&mut self, input: &I) {
        Shooter::control(self, input);
    }

    fn stop(&mut self) {
        self.set_output(0.0);
    }

    fn telemetry(&self) -> Telemetry {
        Shooter::telemetry(self)
    }
}
