//! `ft-timeline`: turns rosters into the tables planners read.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`formatter`] | `TimetableView`: event rows × duty columns pivot                |
//! | [`summary`]   | `DutySummaryRow` (split around the break), `WorkBlockSummary`   |
//! | [`logsheet`]  | `LogSheet`: printable per-duty projection                       |
//! | [`planner`]   | `Planner`, `PlanRequest`, `plan_many`                           |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | `plan_many` runs requests on Rayon's thread pool.        |

pub mod formatter;
pub mod logsheet;
pub mod planner;
pub mod summary;

#[cfg(test)]
mod tests;

pub use formatter::{BREAK_SEPARATOR, EVENT_HEADER, PLACEHOLDER, TimetableRow, TimetableView, TripKeying};
pub use logsheet::{LogLine, LogSheet};
pub use planner::{PlanRequest, Planner, plan_many};
pub use summary::{DutySummaryRow, Summary, WorkBlockSummary};
