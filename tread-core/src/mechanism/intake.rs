//! Deployable intake
//!
//! A solenoid swings the intake out (forward) or stows it (reverse) on
//! button presses. The spinner only runs while the intake is deployed, and
//! only on the tick its button is pressed; every other tick it is
//! commanded to zero.

use crate::config::ConfigError;
use crate::drive::{Telemetry, TelemetryValue};
use crate::safety::safe_percent;
use crate::traits::{Button, EncoderMotor, OperatorInput, Solenoid, SolenoidPosition, Subsystem};

use super::validate_output;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Spinner output while running
pub const DEFAULT_SPINNER_OUTPUT: f64 = 0.4;

/// Intake tuning and bindings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntakeConfig {
    /// Spinner output fraction, in (0, 1]
    pub spinner_output: f64,
    /// Press to stow (solenoid reverse)
    pub stow: Button,
    /// Press to deploy (solenoid forward)
    pub deploy: Button,
    /// Press to run the spinner
    pub spin: Button,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            spinner_output: DEFAULT_SPINNER_OUTPUT,
            stow: Button::A,
            deploy: Button::Y,
            spin: Button::B,
        }
    }
}

impl IntakeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_output(self.spinner_output)
    }
}

/// Intake over a spinner motor and a deploy solenoid
pub struct Intake<M, S> {
    spinner: M,
    solenoid: S,
    config: IntakeConfig,
}

impl<M: EncoderMotor, S: Solenoid> Intake<M, S> {
    /// Create an intake, panicking on an invalid configuration
    pub fn new(spinner: M, solenoid: S, config: IntakeConfig) -> Self {
        match Self::try_new(spinner, solenoid, config) {
            Ok(intake) => intake,
            Err(e) => panic!("invalid intake config: {}", e),
        }
    }

    pub fn try_new(spinner: M, solenoid: S, config: IntakeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            spinner,
            solenoid,
            config,
        })
    }

    /// Run one control tick
    ///
    /// Solenoid presses are handled before the spinner, so deploying and
    /// spinning on the same tick runs the spinner.
    pub fn control<I: OperatorInput + ?Sized>(&mut self, input: &I) {
        if input.button_pressed(self.config.stow) {
            self.move_solenoid(SolenoidPosition::Reverse);
        }
        if input.button_pressed(self.config.deploy) {
            self.move_solenoid(SolenoidPosition::Forward);
        }

        let output = if input.button_pressed(self.config.spin) && self.is_deployed() {
            self.config.spinner_output
        } else {
            0.0
        };
        self.spinner.set_percent_output(safe_percent(output));
    }

    fn move_solenoid(&mut self, position: SolenoidPosition) {
        #[cfg(feature = "defmt")]
        defmt::debug!("intake solenoid -> {}", position);
        self.solenoid.set(position);
    }

    pub fn is_deployed(&self) -> bool {
        self.solenoid.get() == SolenoidPosition::Forward
    }

    pub fn solenoid_position(&self) -> SolenoidPosition {
        self.solenoid.get()
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    pub fn spinner(&self) -> &M {
        &self.spinner
    }

    pub fn solenoid(&self) -> &S {
        &self.solenoid
    }

    pub fn telemetry(&self) -> Telemetry {
        let mut telemetry = Telemetry::new();
        let _ = telemetry.insert(
            "solenoid",
            TelemetryValue::from(self.solenoid.get().as_str()),
        );
        let _ = telemetry.insert(
            "motor",
            TelemetryValue::from(self.spinner.get_output_percent()),
        );
        telemetry
    }
}

impl<M, S, I> Subsystem<I> for Intake<M, S>
where
    M: EncoderMotor,
    S: Solenoid,
    I: OperatorInput,
{
    fn name(&self) -> &'static str {
        "intake"
    }

    fn control(&mut self, input: &I) {
        Intake::control(self, input);
    }

    /// Stops the spinner; the solenoid keeps its position
    fn stop(&mut self) {
        self.spinner.set_percent_output(0.0);
    }

    fn telemetry(&self) -> Telemetry {
        Intake::telemetry(self)
    }
}
