//! `ft-duty`: per-bus duty generators.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                     |
//! |-----------------|--------------------------------------------------------------|
//! | [`crew`]        | `CrewDutyGenerator`: work-hour and tiered-break rules        |
//! | [`electric`]    | `FixedElectricGenerator`: per-bus state-of-charge walk       |
//! | [`feasibility`] | Round-trip, energy, and battery-range checks                 |
//! | [`charging`]    | `charging_plan`: when each bus must start charging           |
//!
//! # Design notes
//!
//! Both generators walk one bus at a time and never share state between
//! buses, so a run is a pure function of `(Route, params, DutyRules)`.  Each
//! `(bus, shift)` pair becomes one [`ft_core::Duty`]; the second shift of a
//! bus starts where the first one signed off.

pub mod charging;
pub mod crew;
pub mod electric;
pub mod feasibility;


pub use charging::{ChargingPlanEntry, ChargingPlanParams, charging_plan};
pub use crew::CrewDutyGenerator;
pub use electric::FixedElectricGenerator;
