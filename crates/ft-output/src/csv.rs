//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `timetable.csv` (header row = the view's headers)
//! - `duty_summary.csv`
//! - `work_blocks.csv`
//! - `charge_sessions.csv`

use std::fs::File;
use std::path::Path;

use csv::{Writer, WriterBuilder};

use ft_timeline::{DutySummaryRow, TimetableView, WorkBlockSummary};

use crate::writer::TimetableWriter;
use crate::{ChargeSessionRow, OutputResult};

pub const TIMETABLE_FILE: &str = "timetable.csv";
pub const DUTY_SUMMARY_FILE: &str = "duty_summary.csv";
pub const WORK_BLOCKS_FILE: &str = "work_blocks.csv";
pub const CHARGE_SESSIONS_FILE: &str = "charge_sessions.csv";

/// Writes one planning run to CSV files.
pub struct CsvWriter {
    timetable:   Writer<File>,
    duties:      Writer<File>,
    work_blocks: Writer<File>,
    charges:     Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Create the four CSV files in `dir` and write the fixed header rows.
    ///
    /// The timetable header depends on the view, so it is written by
    /// [`TimetableWriter::write_timetable`].
    pub fn new(dir: &Path) -> OutputResult<Self> {
        // Consecutive views may differ in column count.
        let timetable = WriterBuilder::new().flexible(true).from_path(dir.join(TIMETABLE_FILE))?;

        let mut duties = Writer::from_path(dir.join(DUTY_SUMMARY_FILE))?;
        duties.write_record([
            "bus_no", "shift_no", "calling_time", "shift_start", "work_start", "work_end", "total_hours",
        ])?;

        let mut work_blocks = Writer::from_path(dir.join(WORK_BLOCKS_FILE))?;
        work_blocks.write_record(["duty", "total_hours", "total_km", "buses"])?;

        let mut charges = Writer::from_path(dir.join(CHARGE_SESSIONS_FILE))?;
        charges.write_record(["bus", "charger", "start", "end", "minutes"])?;

        Ok(Self {
            timetable,
            duties,
            work_blocks,
            charges,
            finished: false,
        })
    }
}

impl TimetableWriter for CsvWriter {
    fn write_timetable(&mut self, view: &TimetableView) -> OutputResult<()> {
        if view.headers.is_empty() {
            return Ok(());
        }
        self.timetable.write_record(&view.headers)?;
        for row in &view.rows {
            self.timetable
                .write_record(std::iter::once(row.label.as_str()).chain(row.cells.iter().map(String::as_str)))?;
        }
        Ok(())
    }

    fn write_duty_summary(&mut self, rows: &[DutySummaryRow]) -> OutputResult<()> {
        for row in rows {
            // Continuation rows leave the duty identity blank.
            let (bus, shift) = if row.is_second_row {
                (String::new(), String::new())
            } else {
                (row.bus_no.to_string(), row.shift_no.to_string())
            };
            self.duties.write_record([
                bus.as_str(),
                shift.as_str(),
                row.calling_time.as_str(),
                row.shift_start.as_str(),
                row.work_start.as_str(),
                row.work_end.as_str(),
                row.total_hours.as_str(),
            ])?;
        }
        Ok(())
    }

    fn write_work_blocks(&mut self, rows: &[WorkBlockSummary]) -> OutputResult<()> {
        for row in rows {
            self.work_blocks
                .write_record([&row.duty, &row.total_hours, &row.total_km, &row.buses.join(", ")])?;
        }
        Ok(())
    }

    fn write_charge_sessions(&mut self, rows: &[ChargeSessionRow]) -> OutputResult<()> {
        for row in rows {
            self.charges.write_record(row.fields())?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.timetable.flush()?;
        self.duties.flush()?;
        self.work_blocks.flush()?;
        self.charges.flush()?;
        Ok(())
    }
}
