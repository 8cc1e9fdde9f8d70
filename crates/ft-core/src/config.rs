//! Duty rules shared by every generator.
//!
//! All the numbers a depot planner would recognise from the labour agreement
//! or the charging manual live here, defaulted in exactly one place and
//! passed explicitly into each generator invocation.

use serde::{Deserialize, Serialize};

use crate::{BusId, Minutes};

/// Work-hour, break, and battery rules for one planning run.
///
/// Partial JSON overrides are accepted: any field missing from the input
/// keeps its [`Default`] value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DutyRules {
    // ── Crew duty ─────────────────────────────────────────────────────────
    /// Ceiling on worked minutes per duty.  Default: 480 (8 h).
    pub duty_ceiling: Minutes,

    /// Gap between calling time and ready time.  Default: 15.
    pub readiness: Minutes,

    /// Length of the single meal break.  Default: 30.
    pub break_duration: Minutes,

    /// Worked minutes after which an early-break bus may break.  Default: 150.
    pub early_break_min_work: Minutes,

    /// Revenue trips an early-break bus must have completed before breaking.
    /// Default: 4.
    pub early_break_min_trips: u32,

    /// Failsafe: any bus must break before projected work exceeds this.
    /// Default: 240 (4 h).
    pub failsafe_break_ceiling: Minutes,

    /// How many of the highest-numbered buses get the early-break tier.
    /// Default: 2.
    pub early_break_buses: u32,

    /// Gap between shift 1 sign-off and shift 2 calling time.  Default: 0.
    pub shift_handover: Minutes,

    // ── Electric, fixed assignment ────────────────────────────────────────
    /// State of charge (percent) a trip may never leave the battery below.
    /// Default: 10.
    pub low_battery_buffer_pct: f64,

    /// Calling-time spacing between buses when no frequency is given.
    /// Default: 10.
    pub default_frequency: Minutes,

    // ── Electric, pooled simulation ───────────────────────────────────────
    /// Turnout preparation at the start of every pooled segment.  Default: 15.
    pub pooled_prep: Minutes,

    /// Elapsed segment time after which the pooled break is inserted.
    /// Default: 240.
    pub pooled_break_trigger: Minutes,

    /// Work requests at or after this minute are dropped.  Default: 1440.
    pub horizon: i64,
}

impl Default for DutyRules {
    fn default() -> Self {
        Self {
            duty_ceiling:           480.0,
            readiness:              15.0,
            break_duration:         30.0,
            early_break_min_work:   150.0,
            early_break_min_trips:  4,
            failsafe_break_ceiling: 240.0,
            early_break_buses:      2,
            shift_handover:         0.0,
            low_battery_buffer_pct: 10.0,
            default_frequency:      10.0,
            pooled_prep:            15.0,
            pooled_break_trigger:   240.0,
            horizon:                24 * 60,
        }
    }
}

impl DutyRules {
    /// `true` if `bus` belongs to the early-break tier of a `fleet`-bus run.
    ///
    /// The tier is the last `early_break_buses` ordinals, but bus 1 always
    /// stays on the failsafe tier so a fleet is never entirely early-break.
    pub fn is_early_break(&self, bus: BusId, fleet: u32) -> bool {
        let first_early = fleet.saturating_sub(self.early_break_buses).max(1) + 1;
        bus.ordinal() >= first_early && bus.ordinal() <= fleet
    }
}
