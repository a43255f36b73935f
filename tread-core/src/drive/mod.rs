//! Differential drive
//!
//! Two-sided tank drive with closed-loop and open-loop command paths,
//! operator-selected control mode and telemetry.

pub mod controller;
pub mod mode;
pub mod telemetry;

pub use controller::DriveTrain;
pub use mode::{ControlMode, ModeCommand};
pub use telemetry::{Telemetry, TelemetryKey, TelemetryValue, TELEMETRY_CAPACITY};
