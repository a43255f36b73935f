//! PWM motor driver with encoder feedback
//!
//! This driver provides:
//! - Open-loop output as a signed fraction mapped to PWM duty + direction pin
//! - Closed-loop velocity control (PIDF) run once per control tick
//! - Encoder-based distance and velocity in configured distance units
//! - Output inversion without rewiring
//!
//! # Usage
//!
//! The driver is updated by calling `update()` once per control tick with
//! the latest encoder count. In velocity mode this recomputes the output.
//!
//! ```ignore
//! let mut motor = PwmMotor::new(pwm, dir_pin, MotorConfig::feed_forward(0.2, 0.0005));
//! motor.set_velocity(1.5);
//!
//! // In the periodic control task:
//! motor.update(encoder.count(), 0.02);
//! ```
//!
//! HAL errors are not reported through [`EncoderMotor`]; the first one is
//! latched and can be read with [`PwmMotor::fault`].

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;
use libm::fabs;

use tread_core::config::MotorConfig;
use tread_core::safety::clamp_symmetric;
use tread_core::traits::EncoderMotor;

/// What the motor is currently being asked to do
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputMode {
    /// Fixed output fraction
    Percent(f64),
    /// Velocity setpoint tracked by the PIDF loop
    Velocity(f64),
}

/// Hardware fault latched by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorFault {
    /// Writing the PWM duty cycle failed
    Pwm,
    /// Driving the direction pin failed
    Direction,
}

/// Velocity loop state
#[derive(Debug, Clone, Copy, Default)]
struct LoopState {
    integral: f64,
    prev_error: Option<f64>,
}

/// H-bridge motor driven by a PWM channel and a direction pin
pub struct PwmMotor<P, D> {
    pwm: P,
    direction: D,
    config: MotorConfig,
    mode: OutputMode,
    inverted: bool,
    /// Logical output fraction (before inversion)
    output_percent: f64,
    velocity: f64,
    distance: f64,
    last_count: Option<i32>,
    loop_state: LoopState,
    fault: Option<MotorFault>,
}

impl<P: SetDutyCycle, D: OutputPin> PwmMotor<P, D> {
    /// Create a motor driver with the output off
    pub fn new(pwm: P, direction: D, config: MotorConfig) -> Self {
        let mut motor = Self {
            pwm,
            direction,
            config,
            mode: OutputMode::Percent(0.0),
            inverted: false,
            output_percent: 0.0,
            velocity: 0.0,
            distance: 0.0,
            last_count: None,
            loop_state: LoopState::default(),
            fault: None,
        };
        motor.apply_output(0.0);
        motor
    }

    /// Feed the latest encoder count and run one control step
    ///
    /// `dt_s` is the time since the previous call. The first call only
    /// records the count.
    pub fn update(&mut self, count: i32, dt_s: f64) {
        let sign = if self.inverted { -1.0 } else { 1.0 };

        if let Some(last) = self.last_count {
            let delta = count.wrapping_sub(last) as f64 * self.config.distance_per_count * sign;
            self.distance += delta;
            if dt_s > 0.0 {
                self.velocity = delta / dt_s;
            }
        }
        self.last_count = Some(count);

        if let OutputMode::Velocity(target) = self.mode {
            let output = self.velocity_output(target, dt_s);
            self.apply_output(output);
        }
    }

    /// PIDF output for a velocity setpoint
    fn velocity_output(&mut self, target: f64, dt_s: f64) -> f64 {
        let config = &self.config;
        let error = target - self.velocity;

        let mut derivative = 0.0;
        if dt_s > 0.0 {
            self.loop_state.integral += error * dt_s;
            if let Some(prev) = self.loop_state.prev_error {
                derivative = (error - prev) / dt_s;
            }
        }
        self.loop_state.prev_error = Some(error);

        // Keep the integral term inside the output range
        if config.ki != 0.0 {
            let limit = fabs(config.max_output / config.ki);
            self.loop_state.integral = clamp_symmetric(self.loop_state.integral, limit);
        }

        let output = config.kf * target
            + config.kp * error
            + config.ki * self.loop_state.integral
            + config.kd * derivative;

        clamp_symmetric(output, config.max_output)
    }

    /// Write a logical output fraction to the hardware
    fn apply_output(&mut self, percent: f64) {
        self.output_percent = percent;

        let physical = if self.inverted { -percent } else { percent };
        let state = if physical < 0.0 {
            PinState::Low
        } else {
            PinState::High
        };
        if self.direction.set_state(state).is_err() {
            self.latch(MotorFault::Direction);
        }

        let max_duty = self.pwm.max_duty_cycle();
        let magnitude = clamp_symmetric(fabs(physical), 1.0);
        let duty = (magnitude * max_duty as f64 + 0.5) as u16;
        if self.pwm.set_duty_cycle(duty.min(max_duty)).is_err() {
            self.latch(MotorFault::Pwm);
        }
    }

    fn latch(&mut self, fault: MotorFault) {
        if self.fault.is_none() {
            #[cfg(feature = "defmt")]
            defmt::warn!("motor fault latched: {}", fault);
            self.fault = Some(fault);
        }
    }

    /// First hardware fault since the last [`clear_fault`](Self::clear_fault)
    pub fn fault(&self) -> Option<MotorFault> {
        self.fault
    }

    pub fn clear_fault(&mut self) {
        self.fault = None;
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Release the PWM channel and direction pin
    pub fn release(self) -> (P, D) {
        (self.pwm, self.direction)
    }
}

impl<P: SetDutyCycle, D: OutputPin> EncoderMotor for PwmMotor<P, D> {
    fn set_velocity(&mut self, velocity: f64) {
        if !matches!(self.mode, OutputMode::Velocity(_)) {
            self.loop_state = LoopState::default();
        }
        self.mode = OutputMode::Velocity(velocity);

        // Feed-forward now; feedback is added on the next update()
        let output = clamp_symmetric(self.config.kf * velocity, self.config.max_output);
        self.apply_output(output);
    }

    fn set_percent_output(&mut self, percent: f64) {
        self.mode = OutputMode::Percent(percent);
        self.loop_state = LoopState::default();
        self.apply_output(percent);
    }

    fn get_velocity(&self) -> f64 {
        self.velocity
    }

    fn get_distance(&self) -> f64 {
        self.distance
    }

    fn get_output_percent(&self) -> f64 {
        self.output_percent
    }

    fn set_inverted(&mut self, inverted: bool) {
        if self.inverted != inverted {
            self.inverted = inverted;
            self.apply_output(self.output_percent);
        }
    }

    fn invert(&mut self) {
        self.set_inverted(!self.inverted);
    }

    fn reset_distance(&mut self) {
        self.distance = 0.0;
    }

    fn set_config(&mut self, config: &MotorConfig) {
        self.config = *config;
        self.loop_state = LoopState::default();
    }
}
