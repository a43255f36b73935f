//! Double-acting solenoid trait

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Valve position of a double-acting solenoid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolenoidPosition {
    /// Neither coil energized
    #[default]
    Off,
    Forward,
    Reverse,
}

impl SolenoidPosition {
    /// Published name
    pub const fn as_str(self) -> &'static str {
        match self {
            SolenoidPosition::Off => "off",
            SolenoidPosition::Forward => "forward",
            SolenoidPosition::Reverse => "reverse",
        }
    }
}

/// Valve that can be driven forward, reverse or released
///
/// Like [`EncoderMotor`](super::EncoderMotor), implementations keep any
/// hardware fault to themselves.
pub trait Solenoid {
    /// Move the valve
    fn set(&mut self, position: SolenoidPosition);

    /// Last commanded position
    fn get(&self) -> SolenoidPosition;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_off() {
        assert_eq!(SolenoidPosition::default(), SolenoidPosition::Off);
    }

    #[test]
    fn test_names() {
        assert_eq!(SolenoidPosition::Off.as_str(), "off");
        assert_eq!(SolenoidPosition::Forward.as_str(), "forward");
        assert_eq!(SolenoidPosition::Reverse.as_str(), "reverse");
    }
}
