//! Simulation observer trait for progress reporting and data collection.

use ft_core::{BusId, Minute, WorkBlock};

use crate::{BusPool, ChargeSlot, WorkRequest};

/// Why a work request was discarded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DropReason {
    /// The request (or the soonest bus) falls at or after the horizon.
    Horizon,
    /// The pool holds no bus at all.
    NoBus,
    /// The segment could not fit one time-adjusted round trip on a full
    /// battery.
    NoProgress,
}

/// Callbacks invoked by [`PoolSim::run`][crate::PoolSim::run] at key points
/// of the event loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  The pool is passed read-only so an
/// observer can audit resource state at every step.
pub trait SimObserver {
    /// A bus has been checked out and is about to drive `request`.
    fn on_segment_start(&mut self, _at: Minute, _request: WorkRequest, _bus: BusId, _pool: &BusPool) {}

    /// `bus` stopped driving at `at` and is back in the pool.
    fn on_segment_end(&mut self, _at: Minute, _request: WorkRequest, _bus: BusId, _pool: &BusPool) {}

    /// `bus` was booked onto a charger.
    fn on_charge(&mut self, _bus: BusId, _slot: ChargeSlot) {}

    fn on_request_dropped(&mut self, _at: Minute, _request: WorkRequest, _reason: DropReason) {}

    /// Called once after the queue is exhausted.
    fn on_sim_end(&mut self, _blocks: &[WorkBlock]) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
