//! Differential drive controller
//!
//! Turns two joystick axes into left/right motor commands each tick.
//!
//! ```text
//!   fb = -shape(forward_back)      lr = shape(rotate)
//!   left = fb - lr                 right = fb + lr
//!
//!   closed loop: velocity = side * controller_scale, clamped to ±max_speed
//!   open loop:   percent  = side,                    clamped to ±1
//! ```
//!
//! The motors are private to the controller and every command path clamps
//! before forwarding, so no out-of-range value can reach a motor through
//! this type.

use crate::config::{ConfigError, DriveTrainConfig, MotorConfig};
use crate::motion::RateLimiter;
use crate::safety::{safe_percent, safe_velocity};
use crate::traits::{EncoderMotor, OperatorInput, Subsystem};

use super::mode::{ControlMode, ModeCommand};
use super::telemetry::{Telemetry, TelemetryKey, TelemetryValue};

/// Drive train over two independently owned motors
pub struct DriveTrain<L, R> {
    left_motor: L,
    right_motor: R,
    /// Available for smoothed commands; not used by [`DriveTrain::control`]
    left_rate_limiter: RateLimiter,
    right_rate_limiter: RateLimiter,
    /// Also holds the current mode (`use_closed_loop`)
    config: DriveTrainConfig,
    /// Last clamped command sent to each side
    left_demand: f64,
    right_demand: f64,
}

impl<L: EncoderMotor, R: EncoderMotor> DriveTrain<L, R> {
    /// Create a drive train, panicking on an invalid configuration
    pub fn new(left_motor: L, right_motor: R, config: DriveTrainConfig) -> Self {
        match Self::try_new(left_motor, right_motor, config) {
            Ok(drive) => drive,
            Err(e) => panic!("invalid drive train config: {}", e),
        }
    }

    /// Create a drive train, rejecting an invalid configuration
    pub fn try_new(
        left_motor: L,
        right_motor: R,
        config: DriveTrainConfig,
    ) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            #[cfg(feature = "defmt")]
            defmt::warn!("drive train config rejected: {}", e);
            return Err(e);
        }

        let limiter = RateLimiter::try_with_start(config.max_change_per_tick(), 0.0)?;
        Ok(Self {
            left_motor,
            right_motor,
            left_rate_limiter: limiter,
            right_rate_limiter: limiter,
            config,
            left_demand: 0.0,
            right_demand: 0.0,
        })
    }

    /// Run one control tick
    ///
    /// Mode buttons are sampled after the motors are commanded, so a mode
    /// change applies from the next tick.
    pub fn control<I: OperatorInput + ?Sized>(&mut self, input: &I) {
        let shaping = self.config.shaping();
        let bindings = self.config.bindings;

        let fb = -shaping.shape(input.axis(bindings.forward_back));
        let lr = shaping.shape(input.axis(bindings.rotate));

        let left = fb - lr;
        let right = fb + lr;

        match self.mode() {
            ControlMode::ClosedLoop => {
                let scale = self.config.controller_scale;
                self.set_left_velocity(left * scale);
                self.set_right_velocity(right * scale);
            }
            ControlMode::OpenLoop => {
                self.set_left_percent_output(left);
                self.set_right_percent_output(right);
            }
        }

        if input.button_pressed(bindings.closed_loop) {
            self.apply_mode(ModeCommand::EnterClosedLoop);
        }
        if input.button_pressed(bindings.open_loop) {
            self.apply_mode(ModeCommand::EnterOpenLoop);
        }
    }

    pub fn set_left_velocity(&mut self, velocity: f64) {
        let velocity = safe_velocity(velocity, self.config.max_speed);
        self.left_demand = velocity;
        self.left_motor.set_velocity(velocity);
    }

    pub fn set_right_velocity(&mut self, velocity: f64) {
        let velocity = safe_velocity(velocity, self.config.max_speed);
        self.right_demand = velocity;
        self.right_motor.set_velocity(velocity);
    }

    /// Command the same velocity on both sides
    pub fn set_velocity(&mut self, velocity: f64) {
        self.set_left_velocity(velocity);
        self.set_right_velocity(velocity);
    }

    pub fn set_left_percent_output(&mut self, percent: f64) {
        let percent = safe_percent(percent);
        self.left_demand = percent;
        self.left_motor.set_percent_output(percent);
    }

    pub fn set_right_percent_output(&mut self, percent: f64) {
        let percent = safe_percent(percent);
        self.right_demand = percent;
        self.right_motor.set_percent_output(percent);
    }

    /// Command the same output fraction on both sides
    pub fn set_percent_output(&mut self, percent: f64) {
        self.set_left_percent_output(percent);
        self.set_right_percent_output(percent);
    }

    /// Command velocities through the per-side rate limiters
    ///
    /// Call at most once per tick; the limiter step assumes the configured
    /// tick rate.
    pub fn set_velocity_limited(&mut self, left: f64, right: f64) {
        let left = self.left_rate_limiter.limit(left);
        let right = self.right_rate_limiter.limit(right);
        self.set_left_velocity(left);
        self.set_right_velocity(right);
    }

    /// Command zero velocity on both sides
    ///
    /// Encoder distance is left untouched.
    pub fn stop(&mut self) {
        self.set_velocity(0.0);
    }

    /// Zero both encoders
    pub fn reset_distance(&mut self) {
        self.left_motor.reset_distance();
        self.right_motor.reset_distance();
    }

    /// Apply an operator mode command
    pub fn apply_mode(&mut self, command: ModeCommand) {
        let current = self.mode();
        let next = current.apply(command);
        if next != current {
            #[cfg(feature = "defmt")]
            defmt::info!("drive mode {} -> {}", current, next);
            self.config.use_closed_loop = next.is_closed_loop();
        }
    }

    /// Set the mode directly
    pub fn set_closed_loop(&mut self, use_closed_loop: bool) {
        let command = if use_closed_loop {
            ModeCommand::EnterClosedLoop
        } else {
            ModeCommand::EnterOpenLoop
        };
        self.apply_mode(command);
    }

    /// Change the velocity clamp, panicking on an invalid value
    pub fn set_max_speed(&mut self, max_speed: f64) {
        if let Err(e) = self.try_set_max_speed(max_speed) {
            panic!("invalid max speed: {}", e);
        }
    }

    /// Change the velocity clamp, rejecting an invalid value
    pub fn try_set_max_speed(&mut self, max_speed: f64) -> Result<(), ConfigError> {
        self.try_update_config(|config| config.max_speed = max_speed)
    }

    pub fn set_controller_dead_band(&mut self, dead_band: f64) {
        if let Err(e) = self.try_set_controller_dead_band(dead_band) {
            panic!("invalid controller dead band: {}", e);
        }
    }

    pub fn try_set_controller_dead_band(&mut self, dead_band: f64) -> Result<(), ConfigError> {
        self.try_update_config(|config| config.controller_dead_band = dead_band)
    }

    pub fn set_controller_power(&mut self, power: u32) {
        if let Err(e) = self.try_set_controller_power(power) {
            panic!("invalid controller power: {}", e);
        }
    }

    pub fn try_set_controller_power(&mut self, power: u32) -> Result<(), ConfigError> {
        self.try_update_config(|config| config.controller_power = power)
    }

    /// Apply a change only if the resulting configuration validates
    fn try_update_config(
        &mut self,
        update: impl FnOnce(&mut DriveTrainConfig),
    ) -> Result<(), ConfigError> {
        let mut candidate = self.config;
        update(&mut candidate);
        if let Err(e) = candidate.validate() {
            #[cfg(feature = "defmt")]
            defmt::warn!("drive train setting rejected: {}", e);
            return Err(e);
        }
        self.config = candidate;
        Ok(())
    }

    pub fn set_left_motor_config(&mut self, config: &MotorConfig) {
        self.left_motor.set_config(config);
    }

    pub fn set_right_motor_config(&mut self, config: &MotorConfig) {
        self.right_motor.set_config(config);
    }

    /// Apply the same hardware configuration to both motors
    pub fn set_motor_configs(&mut self, config: &MotorConfig) {
        self.set_left_motor_config(config);
        self.set_right_motor_config(config);
    }

    pub fn set_left_inverted(&mut self, inverted: bool) {
        self.left_motor.set_inverted(inverted);
    }

    pub fn set_right_inverted(&mut self, inverted: bool) {
        self.right_motor.set_inverted(inverted);
    }

    pub fn invert_left(&mut self) {
        self.left_motor.invert();
    }

    pub fn invert_right(&mut self) {
        self.right_motor.invert();
    }

    pub fn mode(&self) -> ControlMode {
        ControlMode::from_closed_loop(self.config.use_closed_loop)
    }

    pub fn use_closed_loop(&self) -> bool {
        self.config.use_closed_loop
    }

    pub fn config(&self) -> &DriveTrainConfig {
        &self.config
    }

    pub fn left_demand(&self) -> f64 {
        self.left_demand
    }

    pub fn right_demand(&self) -> f64 {
        self.right_demand
    }

    pub fn average_demand(&self) -> f64 {
        (self.left_demand + self.right_demand) / 2.0
    }

    pub fn left_velocity(&self) -> f64 {
        self.left_motor.get_velocity()
    }

    pub fn right_velocity(&self) -> f64 {
        self.right_motor.get_velocity()
    }

    pub fn average_velocity(&self) -> f64 {
        (self.left_velocity() + self.right_velocity()) / 2.0
    }

    pub fn left_distance(&self) -> f64 {
        self.left_motor.get_distance()
    }

    pub fn right_distance(&self) -> f64 {
        self.right_motor.get_distance()
    }

    pub fn average_distance(&self) -> f64 {
        (self.left_distance() + self.right_distance()) / 2.0
    }

    /// Read-only access to the left motor
    pub fn left_motor(&self) -> &L {
        &self.left_motor
    }

    /// Read-only access to the right motor
    pub fn right_motor(&self) -> &R {
        &self.right_motor
    }

    /// Rate limiters for the left and right sides
    pub fn rate_limiters(&self) -> (&RateLimiter, &RateLimiter) {
        (&self.left_rate_limiter, &self.right_rate_limiter)
    }

    /// Read one published value
    pub fn telemetry_value(&self, key: TelemetryKey) -> TelemetryValue {
        match key {
            TelemetryKey::LeftVelocity => self.left_velocity().into(),
            TelemetryKey::RightVelocity => self.right_velocity().into(),
            TelemetryKey::LeftDistance => self.left_distance().into(),
            TelemetryKey::RightDistance => self.right_distance().into(),
            TelemetryKey::LeftDemand => self.left_demand.into(),
            TelemetryKey::RightDemand => self.right_demand.into(),
            TelemetryKey::UseClosedLoop => self.use_closed_loop().into(),
        }
    }

    /// Snapshot of every published value
    pub fn telemetry(&self) -> Telemetry {
        let mut telemetry = Telemetry::new();
        for key in TelemetryKey::ALL {
            // Capacity covers every key
            let _ = telemetry.insert(key.as_str(), self.telemetry_value(key));
        }
        telemetry
    }

    /// Release the motors
    pub fn into_motors(self) -> (L, R) {
        (self.left_motor, self.right_motor)
    }
}

impl<L, R, I> Subsystem<I> for DriveTrain<L, R>
where
    L: EncoderMotor,
    R: EncoderMotor,
    I: OperatorInput,
{
    fn name(&self) -> &'static str {
        "driveTrain"
    }

    fn control(&mut self, input: &I) {
        DriveTrain::control(self, input);
    }

    fn stop(&mut self) {
        DriveTrain::stop(self);
    }

    fn telemetry(&self) -> Telemetry {
        DriveTrain::telemetry(self)
    }
}
