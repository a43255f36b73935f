//! Drive control mode
//!
//! Closed-loop velocity control is the normal mode. Open-loop percent output
//! is the fallback when encoders or velocity tuning misbehave. The operator
//! switches with two separate buttons, each of which sets one mode.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the drive turns stick input into motor commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControlMode {
    /// Velocity setpoints, scaled by the controller scale
    #[default]
    ClosedLoop,
    /// Raw output fractions
    OpenLoop,
}

/// Operator command that selects a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModeCommand {
    EnterClosedLoop,
    EnterOpenLoop,
}

impl ControlMode {
    /// Mode for a boolean closed-loop flag
    pub const fn from_closed_loop(use_closed_loop: bool) -> Self {
        if use_closed_loop {
            ControlMode::ClosedLoop
        } else {
            ControlMode::OpenLoop
        }
    }

    pub const fn is_closed_loop(self) -> bool {
        matches!(self, ControlMode::ClosedLoop)
    }

    /// Mode after a command
    ///
    /// Commands set a mode rather than toggling, so repeating one is a
    /// no-op.
    pub fn apply(self, command: ModeCommand) -> Self {
        match command {
            ModeCommand::EnterClosedLoop => ControlMode::ClosedLoop,
            ModeCommand::EnterOpenLoop => ControlMode::OpenLoop,
        }
    }
}
