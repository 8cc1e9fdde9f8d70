//! `ft-core`: foundational types for the `rust_fleet` timetable engine.
//!
//! This crate is a dependency of every other `ft-*` crate.  It has no `ft-*`
//! dependencies and only two external ones (`thiserror` and `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`ids`]       | `BusId`, `WorkBlockId`, `ChargerId`, `Shift`               |
//! | [`time`]      | `time_to_minutes`, `minutes_to_time`, `Minute`             |
//! | [`config`]    | `DutyRules`: every duty constant, defaulted centrally      |
//! | [`route`]     | `Route` record                                             |
//! | [`params`]    | `CrewParams`, `ElectricParams`, `PoolParams`               |
//! | [`adjust`]    | `TimeAdjustmentRule`, `BusSelector`, `TripTiming`          |
//! | [`event`]     | `Event`, `Duty`, `Schedule`, `WorkBlock`, `Roster`         |
//! | [`strategy`]  | `DutyStrategy` trait shared by all generators              |
//! | [`lenient`]   | serde helpers that coerce bad input to neutral defaults    |
//! | [`error`]     | `FleetError`, `Infeasibility`, `FleetResult`               |

pub mod adjust;
pub mod config;
pub mod error;
pub mod event;
pub mod ids;
pub mod lenient;
pub mod params;
pub mod route;
pub mod strategy;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use adjust::{BusSelector, TimeAdjustmentRule, TripTiming};
pub use config::DutyRules;
pub use error::{FleetError, FleetResult, Infeasibility};
pub use event::{DepotReturn, Duty, Event, Roster, Schedule, TripLeg, WorkBlock};
pub use ids::{BusId, ChargerId, Shift, WorkBlockId};
pub use params::{CrewParams, ElectricParams, PoolParams};
pub use route::Route;
pub use strategy::DutyStrategy;
pub use time::{Minute, Minutes, format_duration, minutes_to_time, time_to_minutes};
