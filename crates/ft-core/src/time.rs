//! Wall-clock time model.
//!
//! # Design
//!
//! Time of day is counted in minutes since midnight.  The crew and fixed
//! electric generators work in fractional [`Minutes`] (a stagger of
//! `round_trip / fleet` rarely divides evenly) and only round when a value is
//! rendered.  The pooled simulation rounds every step onto an integer
//! [`Minute`] clock so that its work queue can be keyed exactly.
//!
//! Parsing never fails: a malformed or absent `HH:MM` string is read as
//! `0` (start of day).  Timetable generation must not abort half-way through
//! a run because one rule carried a typo.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fractional minutes since midnight (or a duration in minutes).
pub type Minutes = f64;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parse the `HH:MM` prefix of `text` into minutes since midnight.
///
/// Trailing text is ignored (`"06:15 (Bus 2)"` → 375).  Returns `0` for
/// anything that does not start with `digits ':' digits`.
pub fn time_to_minutes(text: &str) -> u32 {
    let Some((hours, rest)) = text.trim().split_once(':') else {
        return 0;
    };
    let minutes: String = rest.chars().take_while(char::is_ascii_digit).collect();
    match (hours.trim().parse::<u32>(), minutes.parse::<u32>()) {
        (Ok(h), Ok(m)) => h.saturating_mul(60).saturating_add(m),
        _ => 0,
    }
}

/// Render minutes since midnight as zero-padded `HH:MM`.
///
/// Rounds to the nearest minute and wraps modulo 24 hours, so `1450.0`
/// renders as `"00:10"`.  Non-finite input renders as `"00:00"`.
pub fn minutes_to_time(minutes: Minutes) -> String {
    if !minutes.is_finite() {
        return "00:00".to_owned();
    }
    let total = (minutes.round() as i64).rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Render a duration as `HH:MM` without wrapping (a 25-hour span is `"25:00"`).
pub fn format_duration(minutes: Minutes) -> String {
    if !minutes.is_finite() || minutes <= 0.0 {
        return "00:00".to_owned();
    }
    let total = minutes.round() as i64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

// ── Minute ────────────────────────────────────────────────────────────────────

/// An integer wall-clock minute used by the pooled simulation clock.
///
/// Not wrapped at midnight: `Minute(1500)` is 01:00 on the following day, so
/// ordering stays monotonic across the simulation horizon.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Minute(pub i64);

impl Minute {
    pub const MIDNIGHT: Minute = Minute(0);

    /// Later than any horizon; marks a resource that will never free up.
    pub const NEVER: Minute = Minute(i64::MAX);

    /// Parse a `HH:MM` string with the same tolerance as [`time_to_minutes`].
    pub fn parse(text: &str) -> Minute {
        Minute(time_to_minutes(text) as i64)
    }

    /// Advance by a fractional duration, rounded to the nearest minute.
    ///
    /// Saturates: a duration too large for the clock lands on
    /// [`Minute::NEVER`].
    #[inline]
    pub fn advance(self, minutes: Minutes) -> Minute {
        if !minutes.is_finite() {
            return self;
        }
        Minute(self.0.saturating_add(minutes.round() as i64))
    }

    /// Minutes elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: Minute) -> i64 {
        self.0.saturating_sub(earlier.0)
    }

    /// `true` once the clock has reached [`Minute::NEVER`].
    #[inline]
    pub fn is_never(self) -> bool {
        self >= Minute::NEVER
    }

    #[inline]
    pub fn as_minutes(self) -> Minutes {
        self.0 as Minutes
    }
}

impl std::ops::Add<i64> for Minute {
    type Output = Minute;
    #[inline]
    fn add(self, rhs: i64) -> Minute {
        Minute(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Minute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&minutes_to_time(self.as_minutes()))
    }
}
