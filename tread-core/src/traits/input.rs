//! Operator input trait
//!
//! The drive reads its joystick axes and mode buttons through this trait.
//! The input source is shared and read-only from the drive's point of view.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of analog axes on a standard gamepad
pub const AXIS_COUNT: usize = 6;

/// Number of digital buttons on a standard gamepad
pub const BUTTON_COUNT: usize = 10;

/// Analog gamepad axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
}

impl Axis {
    /// Every axis, in index order
    pub const ALL: [Axis; AXIS_COUNT] = [
        Axis::LeftX,
        Axis::LeftY,
        Axis::RightX,
        Axis::RightY,
        Axis::LeftTrigger,
        Axis::RightTrigger,
    ];

    /// Stable index of this axis (for array-backed state)
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Digital gamepad button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Button {
    A,
    B,
    X,
    Y,
    LeftBumper,
    RightBumper,
    Back,
    Start,
    LeftStick,
    RightStick,
}

impl Button {
    /// Every button, in index order
    pub const ALL: [Button; BUTTON_COUNT] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::LeftBumper,
        Button::RightBumper,
        Button::Back,
        Button::Start,
        Button::LeftStick,
        Button::RightStick,
    ];

    /// Stable index of this button (for array-backed state)
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Source of operator commands, polled once per control tick
pub trait OperatorInput {
    /// Current position of an axis in [-1, 1]
    fn axis(&self, axis: Axis) -> f64;

    /// True only on the tick the button goes from released to pressed
    ///
    /// This is edge-triggered: holding the button reports `true` once.
    fn button_pressed(&self, button: Button) -> bool;

    /// True on every tick the button is held
    fn button_down(&self, button: Button) -> bool;
}

impl<T: OperatorInput + ?Sized> OperatorInput for &T {
    fn axis(&self, axis: Axis) -> f64 {
        (**self).axis(axis)
    }

    fn button_pressed(&self, button: Button) -> bool {
        (**self).button_pressed(button)
    }

    fn button_down(&self, button: Button) -> bool {
        (**self).button_down(button)
    }
}
