//! Time-of-day trip-duration adjustment.
//!
//! Peak rules lengthen trips, reduced rules shorten them.  A rule touches a
//! trip when any part of the trip's occupied window `[start, start + base)`
//! intersects the rule window `[rule_start, rule_end)`:
//!
//! ```text
//! trip_start < rule_end  &&  trip_start + base > rule_start
//! ```
//!
//! Every matching rule contributes; the sum is added to the base duration
//! and the result is floored at one minute.  Because the adjustment is a
//! plain sum, the order in which rules are listed never matters.

use std::fmt;

use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};

use crate::{BusId, Minutes, lenient, time_to_minutes};

/// Shortest duration any adjusted trip may have.
const MIN_TRIP_MINUTES: Minutes = 1.0;

// ── BusSelector ───────────────────────────────────────────────────────────────

/// Which buses a rule applies to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum BusSelector {
    /// Every bus in the fleet.
    #[default]
    All,
    /// One bus, by one-based ordinal.
    Bus(u32),
    /// An unreadable selector; matches no bus.
    Unmatched,
}

impl BusSelector {
    pub fn matches(self, bus: BusId) -> bool {
        match self {
            BusSelector::All => true,
            BusSelector::Bus(ordinal) => ordinal == bus.ordinal(),
            BusSelector::Unmatched => false,
        }
    }

    fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            return BusSelector::All;
        }
        match raw.parse::<f64>() {
            Ok(n) if n >= 1.0 && n.fract() == 0.0 && n <= u32::MAX as f64 => BusSelector::Bus(n as u32),
            _ => BusSelector::Unmatched,
        }
    }
}

impl fmt::Display for BusSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusSelector::All => f.write_str("All"),
            BusSelector::Bus(n) => write!(f, "{n}"),
            BusSelector::Unmatched => f.write_str("?"),
        }
    }
}

impl Serialize for BusSelector {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BusSelector {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        lenient::text(d).map(|raw| BusSelector::parse(&raw))
    }
}

// ── TimeAdjustmentRule ────────────────────────────────────────────────────────

/// One peak-hour or reduced-hour rule.
///
/// `minutes` is always a magnitude; whether it adds or subtracts depends on
/// which list the rule sits in.  A rule with an empty start or end time is
/// ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeAdjustmentRule {
    #[serde(deserialize_with = "lenient::text")]
    pub start_time: String,

    #[serde(deserialize_with = "lenient::text")]
    pub end_time: String,

    #[serde(alias = "extraTime", alias = "reducedTime", deserialize_with = "lenient::number")]
    pub minutes: Minutes,

    pub bus: BusSelector,
}

impl TimeAdjustmentRule {
    pub fn new(start_time: &str, end_time: &str, minutes: Minutes, bus: BusSelector) -> Self {
        Self {
            start_time: start_time.to_owned(),
            end_time: end_time.to_owned(),
            minutes,
            bus,
        }
    }

    /// `true` if this rule applies to `bus` for a trip occupying
    /// `[start, start + duration)`.
    pub fn touches(&self, bus: BusId, start: Minutes, duration: Minutes) -> bool {
        if self.start_time.trim().is_empty() || self.end_time.trim().is_empty() {
            return false;
        }
        let rule_start = time_to_minutes(&self.start_time) as Minutes;
        let rule_end = time_to_minutes(&self.end_time) as Minutes;
        self.bus.matches(bus) && start < rule_end && start + duration > rule_start
    }
}

// ── TripTiming ────────────────────────────────────────────────────────────────

/// The peak and reduced rule sets applied to every trip of a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TripTiming {
    pub peak:    Vec<TimeAdjustmentRule>,
    pub reduced: Vec<TimeAdjustmentRule>,
}

impl TripTiming {
    pub fn new(peak: Vec<TimeAdjustmentRule>, reduced: Vec<TimeAdjustmentRule>) -> Self {
        Self { peak, reduced }
    }

    /// No rules at all: every trip keeps its base duration (floored at 1).
    pub fn none() -> Self {
        Self::default()
    }

    /// Signed sum of every rule touching the trip.
    pub fn adjustment(&self, base: Minutes, start: Minutes, bus: BusId) -> Minutes {
        let extra: Minutes = self
            .peak
            .iter()
            .filter(|r| r.touches(bus, start, base))
            .map(|r| r.minutes)
            .sum();
        let reduced: Minutes = self
            .reduced
            .iter()
            .filter(|r| r.touches(bus, start, base))
            .map(|r| r.minutes)
            .sum();
        extra - reduced
    }

    /// `max(1, base + Σ adjustments)`.
    pub fn adjusted(&self, base: Minutes, start: Minutes, bus: BusId) -> Minutes {
        (base + self.adjustment(base, start, bus)).max(MIN_TRIP_MINUTES)
    }
}
