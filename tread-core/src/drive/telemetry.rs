//! Subsystem telemetry
//!
//! Published values are identified by stable string keys and read fresh on
//! every poll. Reading never changes subsystem state.

use heapless::FnvIndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of entries in a telemetry snapshot (power of two)
pub const TELEMETRY_CAPACITY: usize = 8;

/// Telemetry snapshot keyed by published name
pub type Telemetry = FnvIndexMap<&'static str, TelemetryValue, TELEMETRY_CAPACITY>;

/// A published value
///
/// Only serializable: text values borrow static names.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum TelemetryValue {
    Number(f64),
    Flag(bool),
    Text(&'static str),
}

impl TelemetryValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TelemetryValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            TelemetryValue::Flag(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&'static str> {
        match self {
            TelemetryValue::Text(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for TelemetryValue {
    fn from(value: f64) -> Self {
        TelemetryValue::Number(value)
    }
}

impl From<bool> for TelemetryValue {
    fn from(value: bool) -> Self {
        TelemetryValue::Flag(value)
    }
}

impl From<&'static str> for TelemetryValue {
    fn from(value: &'static str) -> Self {
        TelemetryValue::Text(value)
    }
}

/// Values the drive train publishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TelemetryKey {
    LeftVelocity,
    RightVelocity,
    LeftDistance,
    RightDistance,
    LeftDemand,
    RightDemand,
    UseClosedLoop,
}

impl TelemetryKey {
    /// Every key, in publishing order
    pub const ALL: [TelemetryKey; 7] = [
        TelemetryKey::LeftVelocity,
        TelemetryKey::RightVelocity,
        TelemetryKey::LeftDistance,
        TelemetryKey::RightDistance,
        TelemetryKey::LeftDemand,
        TelemetryKey::RightDemand,
        TelemetryKey::UseClosedLoop,
    ];

    /// Published name
    pub const fn as_str(self) -> &'static str {
        match self {
            TelemetryKey::LeftVelocity => "leftVelocity",
            TelemetryKey::RightVelocity => "rightVelocity",
            TelemetryKey::LeftDistance => "leftDistance",
            TelemetryKey::RightDistance => "rightDistance",
            TelemetryKey::LeftDemand => "leftDemand",
            TelemetryKey::RightDemand => "rightDemand",
            TelemetryKey::UseClosedLoop => "useClosedLoop",
        }
    }

    /// Look up a key by its published name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}
