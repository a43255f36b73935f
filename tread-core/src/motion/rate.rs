//! Rate limiter
//!
//! Bounds how fast the magnitude of a commanded value may grow from one
//! control tick to the next.

use libm::fabs;

use crate::config::ConfigError;

/// Per-tick magnitude rate limiter
///
/// Only increases in magnitude are limited. Decreases and sign reversals
/// pass through unchanged.
///
/// The remembered magnitude is the last *requested* magnitude, not the
/// last output. After a clamped tick the next bound is measured from the
/// raw request, so repeated large requests are limited only on the first
/// tick of each step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateLimiter {
    /// Largest allowed magnitude increase per call
    max_change: f64,
    /// Magnitude of the previous request
    last_magnitude: f64,
}

impl RateLimiter {
    /// Create a limiter starting from zero
    pub fn new(max_change: f64) -> Self {
        Self::with_start(max_change, 0.0)
    }

    /// Create a limiter starting from a known magnitude
    ///
    /// Panics if the step or start magnitude is invalid.
    pub fn with_start(max_change: f64, start: f64) -> Self {
        match Self::try_with_start(max_change, start) {
            Ok(limiter) => limiter,
            Err(e) => panic!("invalid rate limiter: {}", e),
        }
    }

    /// Create a limiter starting from a known magnitude
    ///
    /// The step must be positive and the start magnitude non-negative,
    /// both finite.
    pub fn try_with_start(max_change: f64, start: f64) -> Result<Self, ConfigError> {
        if !max_change.is_finite() || !start.is_finite() {
            return Err(ConfigError::NonFinite);
        }
        if max_change <= 0.0 {
            return Err(ConfigError::InvalidRateStep);
        }
        if start < 0.0 {
            return Err(ConfigError::InvalidRateStart);
        }
        Ok(Self {
            max_change,
            last_magnitude: start,
        })
    }

    /// Create a limiter from an acceleration limit and the control tick rate
    ///
    /// The step per call is `max_acceleration / tick_rate_hz`; the limiter
    /// must then be called exactly once per tick at that rate.
    pub fn from_acceleration(max_acceleration: f64, tick_rate_hz: f64) -> Self {
        Self::new(max_acceleration / tick_rate_hz)
    }

    /// Limit a requested value
    pub fn limit(&mut self, requested: f64) -> f64 {
        let requested_magnitude = fabs(requested);
        let magnitude = if requested_magnitude - self.last_magnitude > self.max_change {
            self.last_magnitude + self.max_change
        } else {
            requested_magnitude
        };

        self.last_magnitude = requested_magnitude;

        if requested > 0.0 {
            magnitude
        } else {
            -magnitude
        }
    }

    /// Step bound per call
    pub fn max_change(&self) -> f64 {
        self.max_change
    }

    /// Magnitude of the last request
    pub fn last_magnitude(&self) -> f64 {
        self.last_magnitude
    }

    /// Forget history and start from `start`
    pub fn reset(&mut self, start: f64) {
        self.last_magnitude = start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_small_step_passes_through() {
        let mut limiter = RateLimiter::new(0.5);
        assert_eq!(limiter.limit(0.3), 0.3);
        assert_eq!(limiter.last_magnitude(), 0.3);
    }

    #[test]
    fn test_large_step_is_clamped() {
        let mut limiter = RateLimiter::new(0.2);
        assert!((limiter.limit(1.0) - 0.2).abs() < 1e-12);
        assert!((limiter.limit(-1.0) - -1.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_request_clamped_keeps_sign() {
        let mut limiter = RateLimiter::new(0.1);
        assert!((limiter.limit(-0.5) + 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_negative_pass_through_keeps_sign() {
        let mut limiter = RateLimiter::with_start(0.1, 0.5);
        assert!((limiter.limit(-0.45) + 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_decrease_not_limited() {
        let mut limiter = RateLimiter::with_start(0.1, 1.0);
        assert_eq!(limiter.limit(0.0), -0.0);
        assert_eq!(limiter.limit(0.05), 0.05);
    }

    #[test]
    fn test_history_tracks_request_not_output() {
        let mut limiter = RateLimiter::new(0.2);

        // Clamped to 0.2, but the remembered magnitude is the request
        assert!((limiter.limit(1.0) - 0.2).abs() < 1e-12);
        assert_eq!(limiter.last_magnitude(), 1.0);

        // Same request again is no longer an increase, so it passes
        assert_eq!(limiter.limit(1.0), 1.0);
    }

    #[test]
    fn test_from_acceleration() {
        let limiter = RateLimiter::from_acceleration(10.0, 50.0);
        assert!((limiter.max_change() - 0.2).abs() < 1e-12);
        assert_eq!(limiter.last_magnitude(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut limiter = RateLimiter::new(0.2);
        limiter.limit(0.1);
        limiter.reset(0.8);
        assert_eq!(limiter.last_magnitude(), 0.8);
        assert_eq!(limiter.limit(0.9), 0.9);
    }

    #[test]
    #[should_panic]
    fn test_zero_step_rejected() {
        let _ = RateLimiter::new(0.0);
    }

    #[test]
    fn test_invalid_start_rejected() {
        assert_eq!(
            RateLimiter::try_with_start(0.2, -0.5),
            Err(ConfigError::InvalidRateStart)
        );
        assert_eq!(
            RateLimiter::try_with_start(0.2, f64::NAN),
            Err(ConfigError::NonFinite)
        );
        assert_eq!(
            RateLimiter::try_with_start(-0.2, 0.0),
            Err(ConfigError::InvalidRateStep)
        );
        assert!(RateLimiter::try_with_start(0.2, 0.5).is_ok());
    }

    #[test]
    #[should_panic(expected = "invalid rate limiter")]
    fn test_negative_start_panics() {
        let _ = RateLimiter::with_start(0.2, -1.0);
    }

    proptest! {
        #[test]
        fn prop_output_bounded_by_previous_plus_step(
            start in 0.0f64..5.0,
            step in 0.01f64..2.0,
            requests in proptest::collection::vec(-10.0f64..10.0, 1..32),
        ) {
            let mut limiter = RateLimiter::with_start(step, start);
            for r in requests {
                let before = limiter.last_magnitude();
                let out = limiter.limit(r);
                prop_assert!(out.abs() <= before + step + 1e-9);
                prop_assert_eq!(limiter.last_magnitude(), r.abs());
            }
        }

        #[test]
        fn prop_output_never_exceeds_request(step in 0.01f64..2.0, r in -10.0f64..10.0) {
            let mut limiter = RateLimiter::new(step);
            prop_assert!(limiter.limit(r).abs() <= r.abs() + 1e-12);
        }
    }
}
