//! The `DutyStrategy` trait: the common face of every generator.
//!
//! The crew generator, the fixed-assignment electric generator, and the
//! pooled electric simulation are alternative answers to the same question
//! ("who drives what, when?") under different cost regimes.  They share
//! this interface so callers can pick one at runtime without caring which.

use crate::{FleetResult, Roster, Route};

/// A timetable generator for one route.
///
/// # Contract
///
/// - Pure: no I/O, no shared mutable state; repeated calls with the same
///   inputs return identical rosters.
/// - Never panics on odd input.  Only infeasible requests return `Err`
///   (see [`crate::Infeasibility`]); everything else yields a possibly
///   empty roster.
/// - `Send + Sync` so independent routes can be planned on separate threads.
pub trait DutyStrategy: Send + Sync {
    /// Short name for logs and reports, e.g. `"crew"`.
    fn name(&self) -> &'static str;

    /// Generate the full-day roster for `route`.
    fn generate(&self, route: &Route) -> FleetResult<Roster>;
}
