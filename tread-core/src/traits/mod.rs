//! Hardware and scheduler abstraction traits
//!
//! These traits define the interface between the control logic and the
//! motor controllers, solenoids, operator input and scheduler around it.

pub mod input;
pub mod motor;
pub mod solenoid;
pub mod subsystem;

pub use input::{Axis, Button, OperatorInput, AXIS_COUNT, BUTTON_COUNT};
pub use motor::EncoderMotor;
pub use solenoid::{Solenoid, SolenoidPosition};
pub use subsystem::Subsystem;
