//! Duty and work-block summaries.

use serde::Serialize;

use ft_core::{Duty, Event, Roster, WorkBlock, format_duration, minutes_to_time};

use crate::formatter::PLACEHOLDER;

/// One work segment of a duty.
///
/// A duty with a break yields two rows: ready → break start, then break end
/// → sign-off.  The second row repeats neither the calling time nor the
/// total, which belong to the duty as a whole.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DutySummaryRow {
    pub bus_no:        u32,
    pub shift_no:      u8,
    pub calling_time:  String,
    pub shift_start:   String,
    pub work_start:    String,
    pub work_end:      String,
    /// Calling time to sign-off, `HH:MM`.
    pub total_hours:   String,
    pub is_second_row: bool,
}

fn time_or_placeholder(minutes: Option<f64>) -> String {
    minutes.map_or_else(|| PLACEHOLDER.to_owned(), minutes_to_time)
}

impl DutySummaryRow {
    pub fn for_duty(duty: &Duty) -> Vec<Self> {
        let calling = duty.calling_time();
        let ready = duty.ready_time();
        let sign_off = duty.sign_off();
        let total = match (calling, sign_off) {
            (Some(c), Some(s)) => format_duration(s - c),
            _ => PLACEHOLDER.to_owned(),
        };

        let first = DutySummaryRow {
            bus_no:        duty.bus.ordinal(),
            shift_no:      duty.shift.number(),
            calling_time:  time_or_placeholder(calling),
            shift_start:   time_or_placeholder(ready),
            work_start:    time_or_placeholder(ready),
            work_end:      time_or_placeholder(sign_off),
            total_hours:   total,
            is_second_row: false,
        };

        match duty.break_event() {
            Some(brk @ Event::Break { .. }) => {
                let second = DutySummaryRow {
                    calling_time:  PLACEHOLDER.to_owned(),
                    shift_start:   PLACEHOLDER.to_owned(),
                    work_start:    minutes_to_time(brk.end()),
                    work_end:      time_or_placeholder(sign_off),
                    total_hours:   PLACEHOLDER.to_owned(),
                    is_second_row: true,
                    ..first.clone()
                };
                let first = DutySummaryRow { work_end: minutes_to_time(brk.start()), ..first };
                vec![first, second]
            }
            _ => vec![first],
        }
    }
}

/// Summary rows for every duty, in duty order.
pub fn duty_summary(duties: &[Duty]) -> Vec<DutySummaryRow> {
    duties.iter().flat_map(DutySummaryRow::for_duty).collect()
}

/// Totals for one pooled work block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkBlockSummary {
    pub duty:        String,
    /// Hours, two decimals.
    pub total_hours: String,
    /// Kilometres, two decimals.
    pub total_km:    String,
    /// Buses that served the block, in first-use order.
    pub buses:       Vec<String>,
}

impl WorkBlockSummary {
    pub fn for_block(block: &WorkBlock) -> Self {
        Self {
            duty:        block.label(),
            total_hours: format!("{:.2}", block.total_minutes / 60.0),
            total_km:    format!("{:.2}", block.total_km),
            buses:       block.buses().iter().map(ToString::to_string).collect(),
        }
    }
}

/// The summary that matches a roster's shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "camelCase")]
pub enum Summary {
    Duties(Vec<DutySummaryRow>),
    WorkBlocks(Vec<WorkBlockSummary>),
}

impl Default for Summary {
    fn default() -> Self {
        Summary::Duties(Vec::new())
    }
}

impl Summary {
    pub fn for_roster(roster: &Roster) -> Self {
        match roster {
            Roster::Duties(schedule) => Summary::Duties(duty_summary(schedule.duties())),
            Roster::WorkBlocks(blocks) => Summary::WorkBlocks(blocks.iter().map(WorkBlockSummary::for_block).collect()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Summary::Duties(rows) => rows.len(),
            Summary::WorkBlocks(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
