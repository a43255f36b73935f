//! Tick-driven subsystem trait
//!
//! The seam between control logic and the scheduler that runs it. The
//! scheduler calls [`Subsystem::control`] once per period and polls
//! [`Subsystem::telemetry`] for publishing.

use crate::drive::Telemetry;

/// A component driven by a fixed-period control loop
pub trait Subsystem<I> {
    /// Stable name used as the telemetry namespace
    fn name(&self) -> &'static str;

    /// Run one control tick
    fn control(&mut self, input: &I);

    /// Command a stop (not an interrupt; takes effect immediately)
    fn stop(&mut self);

    /// Snapshot of the published values
    fn telemetry(&self) -> Telemetry;
}
