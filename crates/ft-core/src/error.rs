//! Engine error type.
//!
//! Only two things are ever reported as errors: an infeasible request (no
//! schedule can be produced at all) and misuse of a sealed duty.  Malformed
//! input never reaches this type; it is coerced to neutral defaults by
//! [`crate::lenient`] before any algorithm runs.

use thiserror::Error;

use crate::{BusId, Shift};

/// Why a request cannot produce any schedule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Infeasibility {
    #[error("round trip time must be greater than zero")]
    NonPositiveRoundTrip,

    #[error(
        "battery range is too low for even one round trip \
         ({range_minutes:.0} min of range, {round_trip_minutes:.0} min round trip)"
    )]
    BatteryRangeTooShort {
        range_minutes:      f64,
        round_trip_minutes: f64,
    },

    #[error("battery capacity and energy consumption must be greater than zero")]
    NoBatteryCapacity,
}

/// The top-level error type for `ft-core` and the engine crates.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("cannot generate schedule: {0}")]
    Infeasible(#[from] Infeasibility),

    #[error("duty {bus} {shift} is already signed off")]
    DutySealed { bus: BusId, shift: Shift },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `ft-*` engine crates.
pub type FleetResult<T> = Result<T, FleetError>;
