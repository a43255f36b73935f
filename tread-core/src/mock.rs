//! Test doubles for the motor, solenoid and operator-input traits
//!
//! Enabled for this crate's own tests and, through the `mock` feature, for
//! downstream crates that want to exercise control logic without hardware.

use heapless::Vec;

use crate::config::MotorConfig;
use crate::traits::{
    Axis, Button, EncoderMotor, OperatorInput, Solenoid, SolenoidPosition, AXIS_COUNT,
    BUTTON_COUNT,
};

/// Number of commands a [`MockMotor`] remembers
pub const COMMAND_HISTORY: usize = 32;

/// A command received by a [`MockMotor`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorCommand {
    Velocity(f64),
    Percent(f64),
}

impl MotorCommand {
    pub fn value(&self) -> f64 {
        match *self {
            MotorCommand::Velocity(v) | MotorCommand::Percent(v) => v,
        }
    }
}

/// Motor that records commands and integrates distance on demand
///
/// In velocity mode the measured velocity equals the setpoint. In percent
/// mode it is the output fraction times `free_speed`.
#[derive(Debug, Clone)]
pub struct MockMotor {
    commands: Vec<MotorCommand, COMMAND_HISTORY>,
    /// Total commands ever received (history may have dropped some)
    command_count: usize,
    velocity: f64,
    output_percent: f64,
    distance: f64,
    free_speed: f64,
    inverted: bool,
    config: Option<MotorConfig>,
}

impl Default for MockMotor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMotor {
    pub fn new() -> Self {
        Self::with_free_speed(1.0)
    }

    /// Motor whose percent-mode velocity is `percent * free_speed`
    pub fn with_free_speed(free_speed: f64) -> Self {
        Self {
            commands: Vec::new(),
            command_count: 0,
            velocity: 0.0,
            output_percent: 0.0,
            distance: 0.0,
            free_speed,
            inverted: false,
            config: None,
        }
    }

    fn record(&mut self, command: MotorCommand) {
        if self.commands.is_full() {
            self.commands.remove(0);
        }
        // Room was made above
        let _ = self.commands.push(command);
        self.command_count += 1;
    }

    /// Advance simulated time, integrating distance
    pub fn advance(&mut self, dt_s: f64) {
        self.distance += self.velocity * dt_s;
    }

    /// Most recent command
    pub fn last_command(&self) -> Option<MotorCommand> {
        self.commands.last().copied()
    }

    /// Recent commands, oldest first
    pub fn commands(&self) -> &[MotorCommand] {
        &self.commands
    }

    pub fn command_count(&self) -> usize {
        self.command_count
    }

    /// Largest command magnitude in the history
    pub fn max_abs_command(&self) -> f64 {
        self.commands
            .iter()
            .map(|c| libm::fabs(c.value()))
            .fold(0.0, f64::max)
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Last configuration applied
    pub fn config(&self) -> Option<MotorConfig> {
        self.config
    }
}

impl EncoderMotor for MockMotor {
    fn set_velocity(&mut self, velocity: f64) {
        self.record(MotorCommand::Velocity(velocity));
        self.velocity = velocity;
        self.output_percent = if self.free_speed != 0.0 {
            velocity / self.free_speed
        } else {
            0.0
        };
    }

    fn set_percent_output(&mut self, percent: f64) {
        self.record(MotorCommand::Percent(percent));
        self.output_percent = percent;
        self.velocity = percent * self.free_speed;
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
        self.inverted = inverted;
    }

    fn invert(&mut self) {
        self.inverted = !self.inverted;
    }

    fn reset_distance(&mut self) {
        self.distance = 0.0;
    }

    fn set_config(&mut self, config: &MotorConfig) {
        self.config = Some(*config);
    }
}

/// Fixed operator input for one tick
///
/// `with_press` marks a button as pressed on this tick (and held);
/// `with_hold` marks it held without a press. No edge detection is done
/// here.
#[derive(Debug, Clone, Default)]
pub struct MockInput {
    axes: [f64; AXIS_COUNT],
    pressed: [bool; BUTTON_COUNT],
    held: [bool; BUTTON_COUNT],
}

impl MockInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_axis(mut self, axis: Axis, value: f64) -> Self {
        self.axes[axis.index()] = value;
        self
    }

    pub fn with_press(mut self, button: Button) -> Self {
        self.pressed[button.index()] = true;
        self.held[button.index()] = true;
        self
    }

    pub fn with_hold(mut self, button: Button) -> Self {
        self.held[button.index()] = true;
        self
    }
}

impl OperatorInput for MockInput {
    fn axis(&self, axis: Axis) -> f64 {
        self.axes[axis.index()]
    }

    fn button_pressed(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }

    fn button_down(&self, button: Button) -> bool {
        self.held[button.index()]
    }
}

/// Solenoid that remembers its position and counts moves
#[derive(Debug, Clone, Default)]
pub struct MockSolenoid {
    position: SolenoidPosition,
    set_count: usize,
}

impl MockSolenoid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls received
    pub fn set_count(&self) -> usize {
        self.set_count
    }
}

impl Solenoid for MockSolenoid {
    fn set(&mut self, position: SolenoidPosition) {
        self.position = position;
        self.set_count += 1;
    }

    fn get(&self) -> SolenoidPosition {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_drops_oldest() {
        let mut motor = MockMotor::new();
        for i in 0..(COMMAND_HISTORY + 3) {
            motor.set_percent_output(i as f64);
        }
        assert_eq!(motor.commands().len(), COMMAND_HISTORY);
        assert_eq!(motor.command_count(), COMMAND_HISTORY + 3);
        assert_eq!(motor.commands()[0], MotorCommand::Percent(3.0));
    }

    #[test]
    fn test_press_implies_hold() {
        let input = MockInput::new().with_press(Button::A).with_hold(Button::X);
        assert!(input.button_pressed(Button::A));
        assert!(input.button_down(Button::A));
        assert!(!input.button_pressed(Button::X));
        assert!(input.button_down(Button::X));
    }

    #[test]
    fn test_percent_velocity() {
        let mut motor = MockMotor::with_free_speed(4.0);
        motor.set_percent_output(0.5);
        assert_eq!(motor.get_velocity(), 2.0);
        motor.advance(0.5);
        assert_eq!(motor.get_distance(), 1.0);
    }
}
