//! Charging plan: when each bus of a fleet must leave service to charge.
//!
//! Buses depart one round trip apart.  Each runs as many whole round trips
//! as its battery range allows, then must start charging.

use log::warn;
use serde::{Deserialize, Serialize};

use ft_core::{BusId, FleetResult, Minutes, Route, lenient, time_to_minutes};

use crate::feasibility;

/// Inputs for [`charging_plan`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChargingPlanParams {
    #[serde(deserialize_with = "lenient::count")]
    pub fleet_size: u32,

    #[serde(deserialize_with = "lenient::non_negative")]
    pub battery_range_hours: f64,

    #[serde(deserialize_with = "lenient::non_negative")]
    pub charging_time_hours: f64,

    /// First departure, `HH:MM`.
    #[serde(deserialize_with = "lenient::text")]
    pub service_start_time: String,
}

/// One bus's line of the plan.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingPlanEntry {
    pub bus:              BusId,
    pub departure:        Minutes,
    pub trips_per_charge: u32,
    /// Latest minute at which the bus must be on a charger.
    pub charge_start:     Minutes,
    pub charge_end:       Minutes,
}

/// Build the charging plan for `route`.
///
/// # Errors
///
/// [`ft_core::FleetError::Infeasible`] when the round trip is not positive
/// or the battery range does not cover a single round trip.
pub fn charging_plan(route: &Route, params: &ChargingPlanParams) -> FleetResult<Vec<ChargingPlanEntry>> {
    let round_trip = feasibility::round_trip(route)?;
    let trips = feasibility::trips_per_charge(params.battery_range_hours * 60.0, round_trip)
        .inspect_err(|e| warn!("charging plan: {e}"))?;

    let start = time_to_minutes(&params.service_start_time) as Minutes;
    let operating = trips as Minutes * round_trip;
    let charging = params.charging_time_hours * 60.0;

    Ok((1..=params.fleet_size)
        .map(|n| {
            let bus = BusId::from_ordinal(n);
            let departure = start + bus.index() as Minutes * round_trip;
            ChargingPlanEntry {
                bus,
                departure,
                trips_per_charge: trips,
                charge_start:     departure + operating,
                charge_end:       departure + operating + charging,
            }
        })
        .collect())
}
