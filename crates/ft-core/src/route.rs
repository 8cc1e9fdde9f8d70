//! The `Route` record: a directional pair of terminals plus distances and
//! traversal rates.
//!
//! # Direction
//!
//! An *up* trip runs `from → to`; a *down* trip runs `to → from`.  Each
//! direction has its own regular distance, turnout distance, and optional
//! per-kilometre rate.  A direction-specific rate of `0` means "not given"
//! and falls back to the general `time_per_km`.

use serde::{Deserialize, Serialize};

use crate::{Minutes, lenient};

/// A fixed bus route as stored by the route store.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Route {
    #[serde(deserialize_with = "lenient::text")]
    pub route_number: String,

    #[serde(deserialize_with = "lenient::text")]
    pub route_name: String,

    /// Origin terminal (start of an up trip).
    #[serde(deserialize_with = "lenient::text")]
    pub from: String,

    /// Destination terminal (start of a down trip).
    #[serde(deserialize_with = "lenient::text")]
    pub to: String,

    /// First stop served after a depot turnout.  Informational.
    #[serde(deserialize_with = "lenient::text")]
    pub first_stop: String,

    #[serde(alias = "upregularKm", alias = "upregularkm", deserialize_with = "lenient::non_negative")]
    pub up_regular_km: f64,

    #[serde(alias = "downregularKm", alias = "downregularkm", deserialize_with = "lenient::non_negative")]
    pub down_regular_km: f64,

    /// Depot → `from` deadhead distance (also `from` → depot on return).
    #[serde(alias = "upturnoutKm", deserialize_with = "lenient::non_negative")]
    pub up_turnout_km: f64,

    /// `to` → depot deadhead distance.
    #[serde(alias = "downturnoutKm", deserialize_with = "lenient::non_negative")]
    pub down_turnout_km: f64,

    /// General traversal rate in minutes per kilometre.
    #[serde(alias = "timeperkm", deserialize_with = "lenient::non_negative")]
    pub time_per_km: f64,

    #[serde(alias = "uptimePerKm", deserialize_with = "lenient::non_negative")]
    pub up_time_per_km: f64,

    #[serde(alias = "downtimePerKm", deserialize_with = "lenient::non_negative")]
    pub down_time_per_km: f64,

    /// Duties begin and end with a depot deadhead leg.
    #[serde(deserialize_with = "lenient::flag")]
    pub turnout_from_depot: bool,
}

impl Route {
    /// Minimal route between two terminals with symmetric distance and rate.
    pub fn between(from: impl Into<String>, to: impl Into<String>, km: f64, time_per_km: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            up_regular_km: km,
            down_regular_km: km,
            time_per_km,
            ..Self::default()
        }
    }

    /// Effective up-direction rate (minutes/km).
    pub fn up_rate(&self) -> f64 {
        if self.up_time_per_km > 0.0 { self.up_time_per_km } else { self.time_per_km }
    }

    /// Effective down-direction rate (minutes/km).
    pub fn down_rate(&self) -> f64 {
        if self.down_time_per_km > 0.0 { self.down_time_per_km } else { self.time_per_km }
    }

    /// Unadjusted up-trip duration.
    pub fn up_minutes(&self) -> Minutes {
        self.up_regular_km * self.up_rate()
    }

    /// Unadjusted down-trip duration.
    pub fn down_minutes(&self) -> Minutes {
        self.down_regular_km * self.down_rate()
    }

    /// Unadjusted round-trip duration (one up plus one down trip).
    pub fn round_trip_minutes(&self) -> Minutes {
        self.up_minutes() + self.down_minutes()
    }

    /// Revenue distance of one round trip.
    pub fn round_trip_km(&self) -> f64 {
        self.up_regular_km + self.down_regular_km
    }

    /// `true` if a bus standing at `location` is about to run an up trip.
    pub fn is_origin(&self, location: &str) -> bool {
        location == self.from
    }

    /// Deadhead distance between `terminal` and the depot.  Zero when the
    /// route does not turn out from the depot.
    pub fn turnout_km_at(&self, terminal: &str) -> f64 {
        if !self.turnout_from_depot {
            0.0
        } else if self.is_origin(terminal) {
            self.up_turnout_km
        } else {
            self.down_turnout_km
        }
    }

    /// Deadhead duration between `terminal` and the depot, at that
    /// direction's rate.
    pub fn turnout_minutes_at(&self, terminal: &str) -> Minutes {
        let rate = if self.is_origin(terminal) { self.up_rate() } else { self.down_rate() };
        self.turnout_km_at(terminal) * rate
    }

    /// Clear turnout data on a route that does not turn out from the depot.
    ///
    /// Applied by the route store on every save.
    pub fn normalized(mut self) -> Self {
        if !self.turnout_from_depot {
            self.first_stop.clear();
            self.up_turnout_km = 0.0;
            self.down_turnout_km = 0.0;
        }
        self
    }
}
