//! `TimetableView`: pivots duty events into one row per event identity and
//! one column per duty (or work block).
//!
//! # Row identity
//!
//! | Event            | Sequence keying (crew, fixed electric) | Directional keying (pooled)         |
//! |------------------|----------------------------------------|-------------------------------------|
//! | Trip             | `Trip {seq}: {from}`                   | `Trip {n} ({from} -> {to})`         |
//! | Break            | `Break`                                | `Break`                             |
//! | everything else  | its label (`Calling Time`, `Turnout`…) | its label                           |
//!
//! In directional keying `n` counts trips leaving the route origin within
//! the column.  A key repeated inside one column (a work block served by
//! several segments has several turnouts) gets a `#2`, `#3`… suffix so no
//! cell is overwritten.  Breaks are the exception: every break lands on the
//! one `Break` row, and a column with several breaks joins them with
//! [`BREAK_SEPARATOR`].
//!
//! # Row order
//!
//! `Calling Time`, then `Ready`, then every other row by the earliest start
//! found in any column (stable on ties), then `Sign Off`.  Empty cells hold
//! [`PLACEHOLDER`].

use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use serde::Serialize;

use ft_core::{BusId, Event, Minutes, Roster, Route, minutes_to_time};

use crate::summary::Summary;

/// Header of the row-label column.
pub const EVENT_HEADER: &str = "Event / Trip";

/// Cell text for a column with no matching event.
pub const PLACEHOLDER: &str = "--";

/// Joins the breaks of one column on the shared `Break` row.
pub const BREAK_SEPARATOR: &str = " / ";

// ── Keying ────────────────────────────────────────────────────────────────────

/// How trip rows are identified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TripKeying {
    /// By trip sequence number and start terminal.
    Sequence,
    /// By a counter of departures from `origin`, plus the direction.
    Directional { origin: String },
}

impl TripKeying {
    /// The keying that fits `roster`'s shape.
    pub fn for_roster(roster: &Roster, route: &Route) -> Self {
        match roster {
            Roster::Duties(_) => TripKeying::Sequence,
            Roster::WorkBlocks(_) => TripKeying::Directional { origin: route.from.clone() },
        }
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────────

/// One timetable row; `cells[i]` belongs to column `headers[i + 1]`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableRow {
    pub label: String,
    pub cells: Vec<String>,
}

/// Position class used for row ordering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Band {
    Calling,
    Ready,
    Body,
    SignOff,
}

impl Band {
    fn of(event: &Event) -> Self {
        match event {
            Event::CallingTime { .. } => Band::Calling,
            Event::Ready { .. } => Band::Ready,
            Event::SignOff { .. } => Band::SignOff,
            _ => Band::Body,
        }
    }
}

struct PendingRow {
    label:    String,
    band:     Band,
    earliest: Minutes,
    cells:    Vec<Option<String>>,
}

/// A column: its header and the events it shows, each with its bus.
struct Column<'a> {
    header: String,
    events: Vec<(BusId, &'a Event)>,
}

fn columns(roster: &Roster) -> Vec<Column<'_>> {
    match roster {
        Roster::Duties(schedule) => schedule
            .duties()
            .iter()
            .map(|d| Column {
                header: d.label(),
                events: d.events().iter().map(|e| (d.bus, e)).collect(),
            })
            .collect(),
        Roster::WorkBlocks(blocks) => blocks
            .iter()
            .map(|b| Column { header: b.label(), events: b.events().collect() })
            .collect(),
    }
}

// ── Cell text ─────────────────────────────────────────────────────────────────

/// `"06.15 (30min)"`.
fn leg_cell(event: &Event) -> String {
    format!(
        "{} ({}min)",
        minutes_to_time(event.start()).replace(':', "."),
        event.duration().round()
    )
}

/// `"06:15"` for instants, `"06:15 - 06:30"` for spans.
fn span(event: &Event) -> String {
    if event.duration() > 0.0 {
        format!("{} - {}", minutes_to_time(event.start()), minutes_to_time(event.end()))
    } else {
        minutes_to_time(event.start())
    }
}

fn key_and_cell(event: &Event, bus: BusId, keying: &TripKeying, departures: &mut u32) -> (String, String) {
    match (keying, event) {
        (TripKeying::Sequence, Event::Trip(leg)) => (format!("Trip {}: {}", leg.seq, leg.from), leg_cell(event)),
        (TripKeying::Directional { origin }, Event::Trip(leg)) => {
            if leg.from == *origin {
                *departures += 1;
            }
            (
                format!("Trip {} ({} -> {})", departures, leg.from, leg.to),
                minutes_to_time(leg.start),
            )
        }
        (TripKeying::Sequence, Event::Break { start, end, location }) => (
            event.label().to_owned(),
            format!(
                "{} - {} ({} mins at {location})",
                minutes_to_time(*start),
                minutes_to_time(*end),
                event.duration().round()
            ),
        ),
        (TripKeying::Sequence, Event::Turnout(_) | Event::ReturnToDepot { .. }) if event.duration() > 0.0 => {
            (event.label().to_owned(), leg_cell(event))
        }
        (TripKeying::Sequence, _) => (event.label().to_owned(), minutes_to_time(event.start())),
        (TripKeying::Directional { .. }, _) => (event.label().to_owned(), format!("{} ({bus})", span(event))),
    }
}

fn pivot(columns: &[Column<'_>], keying: &TripKeying) -> Vec<TimetableRow> {
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut pending: Vec<PendingRow> = Vec::new();

    for (c, column) in columns.iter().enumerate() {
        let mut departures = 0u32;
        let mut repeats: FxHashMap<String, u32> = FxHashMap::default();

        for &(bus, event) in &column.events {
            let (key, cell) = key_and_cell(event, bus, keying, &mut departures);
            let key = if event.is_break() {
                key
            } else {
                let seen = repeats.entry(key.clone()).or_insert(0);
                *seen += 1;
                if *seen > 1 { format!("{key} #{seen}") } else { key }
            };

            let i = match index.get(&key) {
                Some(&i) => i,
                None => {
                    pending.push(PendingRow {
                        label:    key.clone(),
                        band:     Band::of(event),
                        earliest: Minutes::INFINITY,
                        cells:    vec![None; columns.len()],
                    });
                    index.insert(key, pending.len() - 1);
                    pending.len() - 1
                }
            };
            let row = &mut pending[i];
            row.earliest = row.earliest.min(event.start());
            row.cells[c] = Some(match row.cells[c].take() {
                Some(earlier) => format!("{earlier}{BREAK_SEPARATOR}{cell}"),
                None => cell,
            });
        }
    }

    pending.sort_by(|a, b| match a.band.cmp(&b.band) {
        Ordering::Equal if a.band == Band::Body => a.earliest.total_cmp(&b.earliest),
        other => other,
    });

    pending
        .into_iter()
        .map(|row| TimetableRow {
            label: row.label,
            cells: row
                .cells
                .into_iter()
                .map(|cell| cell.unwrap_or_else(|| PLACEHOLDER.to_owned()))
                .collect(),
        })
        .collect()
}

// ── TimetableView ─────────────────────────────────────────────────────────────

/// Everything a presentation layer needs to show one planning run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableView {
    /// [`EVENT_HEADER`] followed by one header per column.
    pub headers:    Vec<String>,
    pub rows:       Vec<TimetableRow>,
    /// The raw duties or work blocks the rows were built from.
    pub roster:     Option<Roster>,
    pub summary:    Summary,
    /// Why no schedule could be produced, if so.
    pub diagnostic: Option<String>,
}

impl TimetableView {
    /// Pivot `roster` into rows and build its summary.
    pub fn from_roster(roster: Roster, route: &Route) -> Self {
        let keying = TripKeying::for_roster(&roster, route);
        let cols = columns(&roster);

        let mut headers = Vec::with_capacity(cols.len() + 1);
        headers.push(EVENT_HEADER.to_owned());
        headers.extend(cols.iter().map(|c| c.header.clone()));
        let rows = pivot(&cols, &keying);

        Self {
            headers,
            rows,
            summary: Summary::for_roster(&roster),
            roster: Some(roster),
            diagnostic: None,
        }
    }

    /// An empty view carrying only a diagnostic message.
    pub fn failed(diagnostic: impl Into<String>) -> Self {
        Self { diagnostic: Some(diagnostic.into()), ..Self::default() }
    }

    /// Column headers without the row-label header.
    pub fn columns(&self) -> &[String] {
        self.headers.get(1..).unwrap_or_default()
    }

    pub fn row(&self, label: &str) -> Option<&TimetableRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Cell at (`row label`, `column header`).
    pub fn cell(&self, label: &str, column: &str) -> Option<&str> {
        let c = self.columns().iter().position(|h| h == column)?;
        self.row(label)?.cells.get(c).map(String::as_str)
    }

    pub fn row_labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(|r| r.label.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
