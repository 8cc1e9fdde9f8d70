//! Duty events and the containers that hold them.
//!
//! # Lifecycle
//!
//! A [`Duty`] is created empty when a shift starts, appended to only by the
//! generator that owns it, and sealed once a [`Event::SignOff`] is appended
//! (or, for pooled segments, when the segment hands its bus back to the
//! depot).  Appending to a sealed duty is an error, never a silent edit.
//!
//! Totals (distance, worked minutes) are derived from events as they are
//! appended, so they can never disagree with the event list.

use serde::Serialize;

use crate::{BusId, FleetError, FleetResult, Minutes, Shift, WorkBlockId};

/// Location name used for the depot end of turnout and return legs.
pub const DEPOT: &str = "Depot";

// ── TripLeg ───────────────────────────────────────────────────────────────────

/// A timed movement between two named places.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripLeg {
    /// Revenue trip sequence number within the duty (1-based).  Depot legs
    /// carry the number of revenue trips run before them.
    pub seq:         u32,
    pub from:        String,
    pub to:          String,
    pub start:       Minutes,
    pub end:         Minutes,
    pub distance_km: f64,
}

impl TripLeg {
    #[inline]
    pub fn duration(&self) -> Minutes {
        self.end - self.start
    }
}

// ── DepotReturn ───────────────────────────────────────────────────────────────

/// Why a bus went back to the depot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DepotReturn {
    /// Normal deadhead leg at the end of a crew duty.
    EndOfDuty,
    /// The next trip would leave the battery under its safety buffer.
    LowBattery,
    /// The next trip would overrun the duty ceiling.
    EndOfShift,
    /// Pooled segment over; the bus queues for a charger.
    Recharge,
}

impl DepotReturn {
    pub fn label(self) -> &'static str {
        match self {
            DepotReturn::EndOfDuty => "Return to Depot",
            DepotReturn::LowBattery => "Return to Depot (Low Battery)",
            DepotReturn::EndOfShift => "Return to Depot (End of Shift)",
            DepotReturn::Recharge => "Return to Depot (Charging)",
        }
    }
}

// ── Event ─────────────────────────────────────────────────────────────────────

/// One entry of a duty.  Each kind carries exactly the fields it needs.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Event {
    CallingTime { at: Minutes },
    Ready { at: Minutes },
    Turnout(TripLeg),
    Trip(TripLeg),
    Break {
        start:    Minutes,
        end:      Minutes,
        location: String,
    },
    ReturnToDepot {
        leg:    TripLeg,
        reason: DepotReturn,
    },
    SignOff { at: Minutes },
}

impl Event {
    /// Wall-clock minute at which the event begins.
    pub fn start(&self) -> Minutes {
        match self {
            Event::CallingTime { at } | Event::Ready { at } | Event::SignOff { at } => *at,
            Event::Turnout(leg) | Event::Trip(leg) | Event::ReturnToDepot { leg, .. } => leg.start,
            Event::Break { start, .. } => *start,
        }
    }

    /// Wall-clock minute at which the event ends (equal to `start` for
    /// instants).
    pub fn end(&self) -> Minutes {
        match self {
            Event::CallingTime { at } | Event::Ready { at } | Event::SignOff { at } => *at,
            Event::Turnout(leg) | Event::Trip(leg) | Event::ReturnToDepot { leg, .. } => leg.end,
            Event::Break { end, .. } => *end,
        }
    }

    #[inline]
    pub fn duration(&self) -> Minutes {
        self.end() - self.start()
    }

    /// Distance driven during the event.
    pub fn distance_km(&self) -> f64 {
        match self {
            Event::Turnout(leg) | Event::Trip(leg) | Event::ReturnToDepot { leg, .. } => leg.distance_km,
            _ => 0.0,
        }
    }

    /// Human-readable kind, as used for timetable row labels.
    pub fn label(&self) -> &'static str {
        match self {
            Event::CallingTime { .. } => "Calling Time",
            Event::Ready { .. } => "Ready",
            Event::Turnout(_) => "Turnout",
            Event::Trip(_) => "Trip",
            Event::Break { .. } => "Break",
            Event::ReturnToDepot { reason, .. } => reason.label(),
            Event::SignOff { .. } => "Sign Off",
        }
    }

    pub fn as_trip(&self) -> Option<&TripLeg> {
        match self {
            Event::Trip(leg) => Some(leg),
            _ => None,
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, Event::Break { .. })
    }
}

// ── Duty ──────────────────────────────────────────────────────────────────────

/// The ordered events of one bus–shift pairing.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Duty {
    pub bus:        BusId,
    pub shift:      Shift,
    events:         Vec<Event>,
    distance_km:    f64,
    worked_minutes: Minutes,
    sealed:         bool,
}

impl Duty {
    pub fn new(bus: BusId, shift: Shift) -> Self {
        Self {
            bus,
            shift,
            events: Vec::new(),
            distance_km: 0.0,
            worked_minutes: 0.0,
            sealed: false,
        }
    }

    /// Append `event`, updating the derived totals.
    ///
    /// Appending a [`Event::SignOff`] seals the duty.
    ///
    /// # Errors
    ///
    /// [`FleetError::DutySealed`] if the duty is already sealed.
    pub fn push(&mut self, event: Event) -> FleetResult<()> {
        if self.sealed {
            return Err(FleetError::DutySealed { bus: self.bus, shift: self.shift });
        }
        self.distance_km += event.distance_km();
        self.worked_minutes += match &event {
            Event::Ready { at } => self.calling_time().map_or(0.0, |call| at - call),
            Event::CallingTime { .. } | Event::SignOff { .. } => 0.0,
            other => other.duration(),
        };
        if matches!(event, Event::SignOff { .. }) {
            self.sealed = true;
        }
        self.events.push(event);
        Ok(())
    }

    /// Seal without a sign-off (pooled segments end at the charger).
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Distance of every trip and depot leg so far.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Readiness, depot legs, trips, and break minutes so far.
    pub fn worked_minutes(&self) -> Minutes {
        self.worked_minutes
    }

    /// Timetable column header, e.g. `"Bus 2 - S1"`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.bus, self.shift)
    }

    pub fn calling_time(&self) -> Option<Minutes> {
        self.events.iter().find_map(|e| match e {
            Event::CallingTime { at } => Some(*at),
            _ => None,
        })
    }

    pub fn ready_time(&self) -> Option<Minutes> {
        self.events.iter().find_map(|e| match e {
            Event::Ready { at } => Some(*at),
            _ => None,
        })
    }

    pub fn sign_off(&self) -> Option<Minutes> {
        self.events.iter().find_map(|e| match e {
            Event::SignOff { at } => Some(*at),
            _ => None,
        })
    }

    /// The duty's break, if one was taken.
    pub fn break_event(&self) -> Option<&Event> {
        self.events.iter().find(|e| e.is_break())
    }

    /// Revenue trips only.
    pub fn trips(&self) -> impl Iterator<Item = &TripLeg> + '_ {
        self.events.iter().filter_map(Event::as_trip)
    }

    /// Minute at which the last event ends, if any.
    pub fn last_end(&self) -> Option<Minutes> {
        self.events.last().map(Event::end)
    }
}

// ── Schedule ──────────────────────────────────────────────────────────────────

/// All duties of one crew or fixed-electric run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Schedule {
    duties: Vec<Duty>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, duty: Duty) {
        self.duties.push(duty);
    }

    /// Order duties by shift, then bus: the timetable column order.
    pub fn sort(&mut self) {
        self.duties.sort_by_key(|d| (d.shift, d.bus));
    }

    pub fn duties(&self) -> &[Duty] {
        &self.duties
    }

    pub fn duty(&self, bus: BusId, shift: Shift) -> Option<&Duty> {
        self.duties.iter().find(|d| d.bus == bus && d.shift == shift)
    }

    pub fn len(&self) -> usize {
        self.duties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.duties.is_empty()
    }

    pub fn into_duties(self) -> Vec<Duty> {
        self.duties
    }
}

// ── WorkBlock ─────────────────────────────────────────────────────────────────

/// One pooled-engine work block: the segments of every bus that served it,
/// in the order they ran.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkBlock {
    pub id:            WorkBlockId,
    pub segments:      Vec<Duty>,
    /// Revenue distance over all segments.
    pub total_km:      f64,
    /// Elapsed segment time (turnout to stop) over all segments.
    pub total_minutes: Minutes,
}

impl WorkBlock {
    pub fn new(id: WorkBlockId) -> Self {
        Self { id, segments: Vec::new(), total_km: 0.0, total_minutes: 0.0 }
    }

    /// Column header, e.g. `"Work Block 3"`.
    pub fn label(&self) -> String {
        self.id.to_string()
    }

    /// Every event of every segment, in run order, paired with its bus.
    pub fn events(&self) -> impl Iterator<Item = (BusId, &Event)> + '_ {
        self.segments
            .iter()
            .flat_map(|seg| seg.events().iter().map(move |e| (seg.bus, e)))
    }

    /// Distinct buses that served this block, in first-use order.
    pub fn buses(&self) -> Vec<BusId> {
        let mut seen = Vec::new();
        for seg in &self.segments {
            if !seen.contains(&seg.bus) {
                seen.push(seg.bus);
            }
        }
        seen
    }
}

// ── Roster ────────────────────────────────────────────────────────────────────

/// The output of any duty strategy.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum Roster {
    /// Per bus–shift duties (crew and fixed-electric generators).
    Duties(Schedule),
    /// Per work-block segment lists (pooled simulation).
    WorkBlocks(Vec<WorkBlock>),
}

impl Roster {
    pub fn is_empty(&self) -> bool {
        match self {
            Roster::Duties(s) => s.is_empty(),
            Roster::WorkBlocks(b) => b.iter().all(|wb| wb.segments.is_empty()),
        }
    }

    /// Every duty or segment, regardless of shape.
    pub fn all_duties(&self) -> Vec<&Duty> {
        match self {
            Roster::Duties(s) => s.duties().iter().collect(),
            Roster::WorkBlocks(b) => b.iter().flat_map(|wb| wb.segments.iter()).collect(),
        }
    }
}
