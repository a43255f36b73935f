//! Motor driver implementations
//!
//! - PWM motors: H-bridge output with encoder feedback and a PIDF velocity loop
//! - Motor pairs: a follower motor mirroring a leader on the same gearbox

pub mod pair;
pub mod pwm;

pub use pair::MotorPair;
pub use pwm::{MotorFault, OutputMode, PwmMotor};
