//! Planning parameters for each strategy.
//!
//! All fields decode leniently: a missing or non-numeric number becomes `0`,
//! a missing list becomes empty.  This is the only place such defaulting
//! happens; the generators trust what they receive.

use serde::{Deserialize, Serialize};

use crate::{Minutes, TimeAdjustmentRule, TripTiming, lenient};

/// Inputs for the crew-duty (diesel) generator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CrewParams {
    /// First bus calling time, `HH:MM`.
    #[serde(deserialize_with = "lenient::text")]
    pub calling_time: String,

    #[serde(deserialize_with = "lenient::count")]
    pub number_of_buses: u32,

    /// Terminal where crews may take their break.
    #[serde(deserialize_with = "lenient::text")]
    pub break_location: String,

    #[serde(deserialize_with = "lenient::list")]
    pub peak_hours: Vec<TimeAdjustmentRule>,

    #[serde(deserialize_with = "lenient::list")]
    pub reduced_hours: Vec<TimeAdjustmentRule>,
}

impl CrewParams {
    pub fn timing(&self) -> TripTiming {
        TripTiming::new(self.peak_hours.clone(), self.reduced_hours.clone())
    }
}

/// Inputs for the fixed-assignment electric generator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElectricParams {
    #[serde(deserialize_with = "lenient::text")]
    pub calling_time: String,

    #[serde(deserialize_with = "lenient::count")]
    pub number_of_buses: u32,

    /// Usable battery capacity, kWh.
    #[serde(deserialize_with = "lenient::non_negative")]
    pub battery_capacity: f64,

    /// Energy consumption, kWh per km.
    #[serde(deserialize_with = "lenient::non_negative")]
    pub energy_consumption: f64,

    /// Calling-time spacing between consecutive buses.  `0` uses
    /// `DutyRules::default_frequency`.
    #[serde(deserialize_with = "lenient::non_negative")]
    pub frequency: Minutes,

    #[serde(deserialize_with = "lenient::list")]
    pub peak_hours: Vec<TimeAdjustmentRule>,

    #[serde(deserialize_with = "lenient::list")]
    pub reduced_hours: Vec<TimeAdjustmentRule>,
}

impl ElectricParams {
    pub fn timing(&self) -> TripTiming {
        TripTiming::new(self.peak_hours.clone(), self.reduced_hours.clone())
    }

    /// Kilometres driven per percent of state of charge.
    pub fn km_per_percent(&self) -> f64 {
        if self.energy_consumption <= 0.0 {
            return 0.0;
        }
        self.battery_capacity / self.energy_consumption / 100.0
    }
}

/// Inputs for the pooled electric simulation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoolParams {
    /// Service start, `HH:MM`; work block 1 starts here.
    #[serde(deserialize_with = "lenient::text")]
    pub calling_time: String,

    /// Number of work blocks (concurrent duties) to cover.
    #[serde(deserialize_with = "lenient::count")]
    pub fleet_size: u32,

    /// Physical buses in the pool.
    #[serde(deserialize_with = "lenient::count")]
    pub total_buses: u32,

    /// Driving time on a full battery.
    #[serde(deserialize_with = "lenient::non_negative")]
    pub battery_range_hours: f64,

    #[serde(deserialize_with = "lenient::non_negative")]
    pub charging_time_hours: f64,

    #[serde(deserialize_with = "lenient::count")]
    pub number_of_chargers: u32,

    /// Break length; `0` uses `DutyRules::break_duration`.
    #[serde(deserialize_with = "lenient::non_negative")]
    pub break_duration: Minutes,

    #[serde(deserialize_with = "lenient::list")]
    pub peak_hours: Vec<TimeAdjustmentRule>,

    #[serde(deserialize_with = "lenient::list")]
    pub reduced_hours: Vec<TimeAdjustmentRule>,
}

impl PoolParams {
    pub fn timing(&self) -> TripTiming {
        TripTiming::new(self.peak_hours.clone(), self.reduced_hours.clone())
    }
}
