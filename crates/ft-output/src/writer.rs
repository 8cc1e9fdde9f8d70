//! The `TimetableWriter` trait implemented by all backend writers.

use ft_timeline::{DutySummaryRow, Summary, TimetableView, WorkBlockSummary};

use crate::{ChargeSessionRow, OutputResult};

/// Sink for one planning run's tables.
pub trait TimetableWriter {
    /// Write the pivoted timetable: the view's headers, then one record per
    /// row.
    fn write_timetable(&mut self, view: &TimetableView) -> OutputResult<()>;

    fn write_duty_summary(&mut self, rows: &[DutySummaryRow]) -> OutputResult<()>;

    fn write_work_blocks(&mut self, rows: &[WorkBlockSummary]) -> OutputResult<()>;

    fn write_charge_sessions(&mut self, rows: &[ChargeSessionRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;

    /// Write the timetable and whichever summary the view carries.
    fn write_view(&mut self, view: &TimetableView) -> OutputResult<()> {
        self.write_timetable(view)?;
        match &view.summary {
            Summary::Duties(rows) => self.write_duty_summary(rows),
            Summary::WorkBlocks(rows) => self.write_work_blocks(rows),
        }
    }
}
