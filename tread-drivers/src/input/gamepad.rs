//! Gamepad input state
//!
//! Raw samples (axis positions and button levels) are fed in once per
//! control tick. Button presses are derived as rising edges between
//! consecutive samples, so a held button reports a press only once.
//!
//! ```ignore
//! let mut pad = Gamepad::new();
//! loop {
//!     pad.update(read_sample());
//!     drive.control(&pad);
//! }
//! ```

use tread_core::traits::{Axis, Button, OperatorInput, AXIS_COUNT, BUTTON_COUNT};

/// One raw reading of the gamepad
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadSample {
    pub axes: [f64; AXIS_COUNT],
    pub buttons: [bool; BUTTON_COUNT],
}

impl GamepadSample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_axis(mut self, axis: Axis, value: f64) -> Self {
        self.axes[axis.index()] = value;
        self
    }

    pub fn with_button(mut self, button: Button) -> Self {
        self.buttons[button.index()] = true;
        self
    }
}

/// Edge-detecting gamepad state
#[derive(Debug, Clone, Default)]
pub struct Gamepad {
    axes: [f64; AXIS_COUNT],
    down: [bool; BUTTON_COUNT],
    pressed: [bool; BUTTON_COUNT],
    connected: bool,
}

impl Gamepad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch a new sample
    ///
    /// Non-finite axis readings are treated as centred; the rest are
    /// clamped to [-1, 1].
    pub fn update(&mut self, sample: GamepadSample) {
        for (axis, raw) in self.axes.iter_mut().zip(sample.axes) {
            *axis = if raw.is_finite() {
                raw.clamp(-1.0, 1.0)
            } else {
                0.0
            };
        }

        for i in 0..BUTTON_COUNT {
            self.pressed[i] = sample.buttons[i] && !self.down[i];
            self.down[i] = sample.buttons[i];
        }

        if !self.connected {
            #[cfg(feature = "defmt")]
            defmt::info!("gamepad connected");
            self.connected = true;
        }
    }

    /// Centre all axes and release all buttons
    ///
    /// Buttons held through a disconnect report a fresh press once the
    /// pad comes back.
    pub fn disconnect(&mut self) {
        if self.connected {
            #[cfg(feature = "defmt")]
            defmt::warn!("gamepad disconnected");
        }
        *self = Self::default();
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

impl OperatorInput for Gamepad {
    fn axis(&self, axis: Axis) -> f64 {
        self.axes[axis.index()]
    }

    fn button_pressed(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }

    fn button_down(&self, button: Button) -> bool {
        self.down[button.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tread_core::config::DriveTrainConfig;
    use tread_core::drive::{ControlMode, DriveTrain};
    use tread_core::mock::{MockMotor, MotorCommand};

    #[test]
    fn test_starts_idle() {
        let pad = Gamepad::new();
        assert!(!pad.is_connected());
        for axis in Axis::ALL {
            assert_eq!(pad.axis(axis), 0.0);
        }
        for button in Button::ALL {
            assert!(!pad.button_pressed(button));
            assert!(!pad.button_down(button));
        }
    }

    #[test]
    fn test_press_is_edge_triggered() {
        let mut pad = Gamepad::new();
        let held = GamepadSample::new().with_button(Button::Start);

        pad.update(held);
        assert!(pad.button_pressed(Button::Start));
        assert!(pad.button_down(Button::Start));

        pad.update(held);
        assert!(!pad.button_pressed(Button::Start));
        assert!(pad.button_down(Button::Start));

        pad.update(GamepadSample::new());
        assert!(!pad.button_pressed(Button::Start));
        assert!(!pad.button_down(Button::Start));

        pad.update(held);
        assert!(pad.button_pressed(Button::Start));
    }

    #[test]
    fn test_buttons_are_independent() {
        let mut pad = Gamepad::new();
        pad.update(GamepadSample::new().with_button(Button::A));
        pad.update(GamepadSample::new().with_button(Button::A).with_button(Button::B));

        assert!(!pad.button_pressed(Button::A));
        assert!(pad.button_pressed(Button::B));
        assert!(!pad.button_pressed(Button::Back));
    }

    #[test]
    fn test_axes_clamped() {
        let mut pad = Gamepad::new();
        pad.update(
            GamepadSample::new()
                .with_axis(Axis::LeftY, 1.7)
                .with_axis(Axis::RightX, -3.0)
                .with_axis(Axis::LeftX, 0.25),
        );
        assert_eq!(pad.axis(Axis::LeftY), 1.0);
        assert_eq!(pad.axis(Axis::RightX), -1.0);
        assert_eq!(pad.axis(Axis::LeftX), 0.25);
    }

    #[test]
    fn test_non_finite_axes_centred() {
        let mut pad = Gamepad::new();
        pad.update(
            GamepadSample::new()
                .with_axis(Axis::LeftY, f64::NAN)
                .with_axis(Axis::RightX, f64::INFINITY),
        );
        assert_eq!(pad.axis(Axis::LeftY), 0.0);
        assert_eq!(pad.axis(Axis::RightX), 0.0);
    }

    #[test]
    fn test_disconnect_releases_everything() {
        let mut pad = Gamepad::new();
        let sample = GamepadSample::new()
            .with_axis(Axis::LeftY, -0.8)
            .with_button(Button::Back);
        pad.update(sample);
        assert!(pad.is_connected());

        pad.disconnect();
        assert!(!pad.is_connected());
        assert_eq!(pad.axis(Axis::LeftY), 0.0);
        assert!(!pad.button_down(Button::Back));

        // Still held on reconnect: counts as a new press
        pad.update(sample);
        assert!(pad.button_pressed(Button::Back));
    }

    #[test]
    fn test_drives_drive_train() {
        let mut drive = DriveTrain::new(
            MockMotor::new(),
            MockMotor::new(),
            DriveTrainConfig::new(2.0, 4.0),
        );
        let mut pad = Gamepad::new();

        // Full forward is stick pushed away (negative)
        let forward = GamepadSample::new().with_axis(Axis::LeftY, -1.0);
        pad.update(forward);
        drive.control(&pad);
        assert_eq!(drive.left_motor().last_command(), Some(MotorCommand::Velocity(2.0)));
        assert_eq!(drive.right_motor().last_command(), Some(MotorCommand::Velocity(2.0)));

        // Holding BACK switches mode once; the switch shows on the next tick
        let back = forward.with_button(Button::Back);
        pad.update(back);
        drive.control(&pad);
        assert_eq!(drive.mode(), ControlMode::OpenLoop);
        assert_eq!(drive.left_motor().last_command(), Some(MotorCommand::Velocity(2.0)));

        pad.update(back);
        drive.control(&pad);
        assert_eq!(drive.left_motor().last_command(), Some(MotorCommand::Percent(1.0)));

        pad.update(forward.with_button(Button::Start));
        drive.control(&pad);
        assert_eq!(drive.mode(), ControlMode::ClosedLoop);
    }

    #[test]
    fn test_held_button_fires_shooter() {
        use tread_core::mechanism::{Shooter, ShooterConfig};

        let mut shooter = Shooter::new(MockMotor::new(), MockMotor::new(), ShooterConfig::default());
        let mut pad = Gamepad::new();
        let fire = GamepadSample::new().with_button(Button::X);

        pad.update(fire);
        shooter.control(&pad);
        assert_eq!(shooter.output(), 0.5);

        // Level-triggered: keeps firing after the press tick
        pad.update(fire);
        shooter.control(&pad);
        assert_eq!(shooter.output(), 0.5);

        pad.update(GamepadSample::new());
        shooter.control(&pad);
        assert_eq!(shooter.output(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_axes_always_in_range(raw in proptest::num::f64::ANY) {
            let mut pad = Gamepad::new();
            pad.update(GamepadSample::new().with_axis(Axis::RightY, raw));
            let value = pad.axis(Axis::RightY);
            prop_assert!((-1.0..=1.0).contains(&value));
        }

        #[test]
        fn prop_press_never_while_held(levels in proptest::collection::vec(any::<bool>(), 1..40)) {
            let mut pad = Gamepad::new();
            let mut previous = false;
            for level in levels {
                let mut sample = GamepadSample::new();
                sample.buttons[Button::X.index()] = level;
                pad.update(sample);
                prop_assert_eq!(pad.button_pressed(Button::X), level && !previous);
                previous = level;
            }
        }
    }
}
