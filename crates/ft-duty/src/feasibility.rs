//! Up-front checks that decide whether a request can produce any schedule.

use ft_core::{ElectricParams, Infeasibility, Minutes, Route};

/// Unadjusted round-trip duration of `route`.
///
/// # Errors
///
/// [`Infeasibility::NonPositiveRoundTrip`] if it is zero (for example a
/// route with no distances or no traversal rate).
pub fn round_trip(route: &Route) -> Result<Minutes, Infeasibility> {
    let minutes = route.round_trip_minutes();
    if minutes > 0.0 && minutes.is_finite() {
        Ok(minutes)
    } else {
        Err(Infeasibility::NonPositiveRoundTrip)
    }
}

/// Kilometres per percent of charge for a fixed-assignment electric run.
///
/// # Errors
///
/// [`Infeasibility::NoBatteryCapacity`] when capacity or consumption is
/// zero, since no trip could ever be costed.
pub fn energy(params: &ElectricParams) -> Result<f64, Infeasibility> {
    let km_per_percent = params.km_per_percent();
    if km_per_percent > 0.0 && km_per_percent.is_finite() {
        Ok(km_per_percent)
    } else {
        Err(Infeasibility::NoBatteryCapacity)
    }
}

/// Whole round trips that fit into `range_minutes` of battery range.
///
/// # Errors
///
/// [`Infeasibility::BatteryRangeTooShort`] if not even one fits.
pub fn trips_per_charge(range_minutes: Minutes, round_trip_minutes: Minutes) -> Result<u32, Infeasibility> {
    let trips = (range_minutes / round_trip_minutes).floor();
    if trips >= 1.0 {
        Ok(trips.min(u32::MAX as f64) as u32)
    } else {
        Err(Infeasibility::BatteryRangeTooShort { range_minutes, round_trip_minutes })
    }
}
