//! `ft-output`: writers that persist planning output.
//!
//! | File                  | Contents                                        |
//! |-----------------------|-------------------------------------------------|
//! | `timetable.csv`       | The pivoted timetable, headers from the view    |
//! | `duty_summary.csv`    | Duty summary rows, split around the break       |
//! | `work_blocks.csv`     | Pooled work-block totals                        |
//! | `charge_sessions.csv` | Charger bookings of a pooled run                |
//!
//! [`CsvWriter`] implements [`TimetableWriter`].  Charging sessions are only
//! visible while the pooled engine runs, so they are captured by
//! [`ChargeLogObserver`], which implements `ft_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ft_output::{ChargeLogObserver, CsvWriter, TimetableWriter};
//!
//! let mut obs = ChargeLogObserver::new(CsvWriter::new(Path::new("./output"))?);
//! let blocks = sim.run(&route, &mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! let mut writer = obs.into_writer();
//! writer.write_view(&TimetableView::from_roster(Roster::WorkBlocks(blocks), &route))?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ChargeLogObserver;
pub use row::ChargeSessionRow;
pub use writer::TimetableWriter;
