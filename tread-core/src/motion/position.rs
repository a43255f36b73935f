//! Position control for a single axis
//!
//! Drives toward a fixed target at full speed, slows along a linear ramp
//! once inside `slow_start`, and reports completion only after several
//! consecutive on-target samples so that overshoot or sensor noise does not
//! end a move early.

use libm::fabs;

use crate::config::{ConfigError, PositionControlConfig};

/// Consecutive on-target samples required before a move is finished
pub const HIT_COUNT_NEEDED: u32 = 3;

/// Progress of a position move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PositionState {
    /// Still moving, or on target for fewer than [`HIT_COUNT_NEEDED`] samples
    Seeking,
    /// On target for at least [`HIT_COUNT_NEEDED`] consecutive samples
    Settled,
}

/// Single-use position controller for one target
///
/// The output follows `y = slow_rate * distance + slow_offset` between
/// `dead_band` (where it equals the minimum speed) and `slow_start` (where
/// it equals `max_speed`). There is no way to change the target; build a
/// new controller for a new move.
#[derive(Debug, Clone)]
pub struct PositionController {
    target: f64,
    dead_band: f64,
    /// Distance from target where the ramp begins
    slow_start: f64,
    /// Ramp slope
    slow_rate: f64,
    /// Ramp intercept
    slow_offset: f64,
    max_speed: f64,
    /// Consecutive on-target samples
    hit_count: u32,
}

impl PositionController {
    /// Create a controller, panicking on an invalid configuration
    ///
    /// A bad ramp is a tuning error with no runtime recovery, so this fails
    /// fast. Use [`try_new`](Self::try_new) to handle it instead.
    pub fn new(config: PositionControlConfig) -> Self {
        match Self::try_new(config) {
            Ok(controller) => controller,
            Err(e) => panic!("invalid position control config: {}", e),
        }
    }

    /// Create a controller, rejecting degenerate ramps
    pub fn try_new(config: PositionControlConfig) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            #[cfg(feature = "defmt")]
            defmt::warn!("position config rejected: {}", e);
            return Err(e);
        }

        let speed_range = config.max_speed - config.min_speed;
        let slow_start = config.dead_band + speed_range / config.slow_rate;
        let slow_rate = speed_range / (slow_start - config.dead_band);
        let slow_offset = config.min_speed - config.dead_band * slow_rate;

        Ok(Self {
            target: config.target,
            dead_band: config.dead_band,
            slow_start,
            slow_rate,
            slow_offset,
            max_speed: config.max_speed,
            hit_count: 0,
        })
    }

    /// Compute the signed output for the current position
    ///
    /// The output always pushes toward the target, so it changes sign after
    /// an overshoot. Inside the dead band the output is zero and the hit
    /// count advances; anywhere else the hit count is cleared.
    pub fn get_speed(&mut self, position: f64) -> f64 {
        let diff = self.target - position;
        let distance = fabs(diff);

        if distance < self.dead_band {
            self.hit_count = self.hit_count.saturating_add(1);
            #[cfg(feature = "defmt")]
            if self.hit_count == HIT_COUNT_NEEDED {
                defmt::debug!("position settled at {} (target {})", position, self.target);
            }
            return 0.0;
        }

        let output = if distance < self.slow_start {
            distance * self.slow_rate + self.slow_offset
        } else {
            self.max_speed
        };

        #[cfg(feature = "defmt")]
        if self.hit_count >= HIT_COUNT_NEEDED {
            defmt::debug!("position left tolerance at {}", position);
        }
        self.hit_count = 0;

        if diff > 0.0 {
            output
        } else {
            -output
        }
    }

    /// Check if the move is complete
    pub fn is_finished(&self) -> bool {
        self.hit_count >= HIT_COUNT_NEEDED
    }

    /// Current move state
    pub fn state(&self) -> PositionState {
        if self.is_finished() {
            PositionState::Settled
        } else {
            PositionState::Seeking
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn dead_band(&self) -> f64 {
        self.dead_band
    }

    /// Distance at which the ramp begins
    pub fn slow_start(&self) -> f64 {
        self.slow_start
    }

    pub fn slow_rate(&self) -> f64 {
        self.slow_rate
    }

    pub fn slow_offset(&self) -> f64 {
        self.slow_offset
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Consecutive on-target samples so far
    pub fn hit_count(&self) -> u32 {
        self.hit_count
    }
}
