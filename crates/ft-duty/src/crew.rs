//! Crew duty generator for conventional (diesel) buses.
//!
//! # Duty walk
//!
//! Each bus works two consecutive shifts.  A shift is a greedy walk:
//!
//! ```text
//! CallingTime ─▶ Ready (+readiness) ─▶ [Turnout] ─▶ Trip ⇄ Trip ⇄ … ─▶ [ReturnToDepot] ─▶ SignOff
//!                                                    └─ at most one Break ─┘
//! ```
//!
//! Before each trip the walk speculatively adds the trip's adjusted duration
//! and, when the route turns out from the depot, the unadjusted return leg
//! from the trip's destination.  If that would pass the duty ceiling the
//! walk stops, so worked minutes never exceed the ceiling.
//!
//! # Break tiers
//!
//! A break is considered only at the configured break location, and only
//! once per shift.  Buses in the early-break tier (see
//! [`DutyRules::is_early_break`]) may break once they have worked
//! `early_break_min_work` minutes over at least `early_break_min_trips`
//! revenue trips.  Every bus must break when the next trip would take its
//! worked time past `failsafe_break_ceiling`.  A due break that no longer
//! fits under the ceiling ends the duty instead.

use log::{debug, trace};

use ft_core::event::DEPOT;
use ft_core::{
    BusId, CrewParams, DepotReturn, Duty, DutyRules, DutyStrategy, Event, FleetResult, Minutes,
    Roster, Route, Schedule, Shift, TripLeg, TripTiming, time_to_minutes,
};

use crate::feasibility;

/// Generates two-shift crew duties for every bus of a fixed route.
#[derive(Clone, Debug)]
pub struct CrewDutyGenerator {
    params: CrewParams,
    rules:  DutyRules,
    timing: TripTiming,
}

impl CrewDutyGenerator {
    /// Generator with the default [`DutyRules`].
    pub fn new(params: CrewParams) -> Self {
        let timing = params.timing();
        Self { params, rules: DutyRules::default(), timing }
    }

    /// Replace the duty rules.
    pub fn with_rules(mut self, rules: DutyRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn params(&self) -> &CrewParams {
        &self.params
    }

    pub fn rules(&self) -> &DutyRules {
        &self.rules
    }

    /// Build the full schedule for `route`, sorted by `(shift, bus)`.
    ///
    /// # Errors
    ///
    /// [`ft_core::FleetError::Infeasible`] if the route's round trip is not
    /// positive.
    pub fn schedule(&self, route: &Route) -> FleetResult<Schedule> {
        let round_trip = feasibility::round_trip(route)?;
        let fleet = self.params.number_of_buses;
        let first_call = time_to_minutes(&self.params.calling_time) as Minutes;

        let mut schedule = Schedule::new();
        for n in 1..=fleet {
            let bus = BusId::from_ordinal(n);
            let stagger = bus.index() as Minutes * round_trip / fleet as Minutes;
            let mut calling = first_call + stagger;

            for shift in Shift::ALL {
                let duty = self.walk(route, bus, shift, calling, fleet)?;
                calling = duty.last_end().unwrap_or(calling) + self.rules.shift_handover;
                schedule.push(duty);
            }
        }
        schedule.sort();
        debug!("crew: {} duties for {} buses", schedule.len(), fleet);
        Ok(schedule)
    }

    // ── Shift walk ────────────────────────────────────────────────────────

    fn walk(&self, route: &Route, bus: BusId, shift: Shift, calling: Minutes, fleet: u32) -> FleetResult<Duty> {
        let rules = &self.rules;
        let ceiling = rules.duty_ceiling;
        let early_tier = rules.is_early_break(bus, fleet);

        let mut duty = Duty::new(bus, shift);
        let mut now = calling;
        duty.push(Event::CallingTime { at: now })?;
        now += rules.readiness;
        duty.push(Event::Ready { at: now })?;

        let mut location = route.from.clone();

        if route.turnout_from_depot {
            let base = route.turnout_minutes_at(&location);
            let minutes = self.timing.adjusted(base, now, bus);
            if duty.worked_minutes() + minutes <= ceiling {
                duty.push(Event::Turnout(TripLeg {
                    seq:         0,
                    from:        DEPOT.to_owned(),
                    to:          location.clone(),
                    start:       now,
                    end:         now + minutes,
                    distance_km: route.turnout_km_at(&location),
                }))?;
                now += minutes;
            }
        }

        let mut trips = 0u32;
        let mut break_taken = false;
        loop {
            let up = route.is_origin(&location);
            let (km, base, destination) = if up {
                (route.up_regular_km, route.up_minutes(), route.to.as_str())
            } else {
                (route.down_regular_km, route.down_minutes(), route.from.as_str())
            };
            let minutes = self.timing.adjusted(base, now, bus);
            let return_leg = route.turnout_minutes_at(destination);
            let worked = duty.worked_minutes();

            if worked + minutes + return_leg > ceiling {
                break;
            }

            if !break_taken
                && location == self.params.break_location
                && self.break_due(early_tier, worked, minutes, trips)
            {
                if worked + rules.break_duration + return_leg > ceiling {
                    break;
                }
                debug!("{bus} {shift}: break at {location} after {trips} trips");
                duty.push(Event::Break {
                    start:    now,
                    end:      now + rules.break_duration,
                    location: location.clone(),
                })?;
                now += rules.break_duration;
                break_taken = true;
                continue;
            }

            trips += 1;
            trace!("{bus} {shift}: trip {trips} {location} -> {destination} ({minutes} min)");
            duty.push(Event::Trip(TripLeg {
                seq:         trips,
                from:        location.clone(),
                to:          destination.to_owned(),
                start:       now,
                end:         now + minutes,
                distance_km: km,
            }))?;
            now += minutes;
            location = destination.to_owned();
        }

        if route.turnout_from_depot {
            let base = route.turnout_minutes_at(&location);
            let minutes = self.timing.adjusted(base, now, bus);
            if duty.worked_minutes() + minutes <= ceiling {
                duty.push(Event::ReturnToDepot {
                    leg: TripLeg {
                        seq:         trips,
                        from:        location.clone(),
                        to:          DEPOT.to_owned(),
                        start:       now,
                        end:         now + minutes,
                        distance_km: route.turnout_km_at(&location),
                    },
                    reason: DepotReturn::EndOfDuty,
                })?;
                now += minutes;
            }
        }

        duty.push(Event::SignOff { at: now })?;
        Ok(duty)
    }

    fn break_due(&self, early_tier: bool, worked: Minutes, next_trip: Minutes, trips: u32) -> bool {
        let rules = &self.rules;
        let early = early_tier
            && worked >= rules.early_break_min_work
            && trips >= rules.early_break_min_trips;
        early || worked + next_trip > rules.failsafe_break_ceiling
    }
}

impl DutyStrategy for CrewDutyGenerator {
    fn name(&self) -> &'static str {
        "crew"
    }

    fn generate(&self, route: &Route) -> FleetResult<Roster> {
        self.schedule(route).map(Roster::Duties)
    }
}
