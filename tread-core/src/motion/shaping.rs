//! Joystick input shaping
//!
//! A dead band removes stick drift near centre, then the remaining range is
//! stretched back to [0, 1] and raised to a power for finer control at low
//! speed.

use libm::{fabs, pow};

use crate::config::ShapingParameters;

/// Shape a raw axis value in [-1, 1]
///
/// The sign test is a strict `input > 0`, so zero and negative inputs share
/// the negative branch. For zero that yields `-0.0`, which compares equal
/// to `0.0`.
pub fn shape(input: f64, dead_band: f64, power: u32) -> f64 {
    let magnitude = fabs(input);
    let dead_banded = if magnitude < dead_band {
        0.0
    } else {
        (magnitude - dead_band) * (1.0 / (1.0 - dead_band))
    };
    let smoothed = pow(dead_banded, power as f64);

    if input > 0.0 {
        smoothed
    } else {
        -smoothed
    }
}

impl ShapingParameters {
    /// Shape a raw axis value with these parameters
    pub fn shape(&self, input: f64) -> f64 {
        shape(input, self.dead_band, self.power)
    }
}
