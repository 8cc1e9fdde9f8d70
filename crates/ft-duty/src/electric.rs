//! Fixed-assignment electric duty generator.
//!
//! Every bus keeps its own battery for the whole day.  The battery is
//! tracked as a state of charge in percent, starting at 100 and draining by
//! `km / km_per_percent` per kilometre driven.  Nothing recharges it between
//! the two shifts, and the bus's direction of travel carries over too.
//!
//! Before each trip the walk checks, in order:
//!
//! 1. the trip would leave the charge under the low-battery buffer:
//!    return to depot, reason [`DepotReturn::LowBattery`];
//! 2. the trip (plus the depot return leg) would pass the duty ceiling:
//!    return to depot, reason [`DepotReturn::EndOfShift`];
//! 3. no break yet and `early_break_min_work` minutes on the road: take the
//!    break if it fits under the ceiling.

use log::{debug, trace};

use ft_core::event::DEPOT;
use ft_core::{
    BusId, DepotReturn, Duty, DutyRules, DutyStrategy, ElectricParams, Event, FleetResult,
    Minutes, Roster, Route, Schedule, Shift, TripLeg, TripTiming, time_to_minutes,
};

use crate::feasibility;

/// Per-bus battery and position, carried from shift 1 into shift 2.
#[derive(Clone, Debug)]
struct BusState {
    soc:      f64,
    location: String,
}

/// Generates two-shift electric duties with one battery per bus.
#[derive(Clone, Debug)]
pub struct FixedElectricGenerator {
    params: ElectricParams,
    rules:  DutyRules,
    timing: TripTiming,
}

impl FixedElectricGenerator {
    pub fn new(params: ElectricParams) -> Self {
        let timing = params.timing();
        Self { params, rules: DutyRules::default(), timing }
    }

    pub fn with_rules(mut self, rules: DutyRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn params(&self) -> &ElectricParams {
        &self.params
    }

    /// Build the full schedule for `route`, sorted by `(shift, bus)`.
    ///
    /// # Errors
    ///
    /// [`ft_core::FleetError::Infeasible`] if the round trip is not positive
    /// or the battery parameters cannot cost a single kilometre.
    pub fn schedule(&self, route: &Route) -> FleetResult<Schedule> {
        feasibility::round_trip(route)?;
        let km_per_percent = feasibility::energy(&self.params)?;

        let spacing = if self.params.frequency > 0.0 {
            self.params.frequency
        } else {
            self.rules.default_frequency
        };
        let first_call = time_to_minutes(&self.params.calling_time) as Minutes;

        let mut schedule = Schedule::new();
        for n in 1..=self.params.number_of_buses {
            let bus = BusId::from_ordinal(n);
            let mut state = BusState { soc: 100.0, location: route.from.clone() };
            let mut calling = first_call + bus.index() as Minutes * spacing;

            for shift in Shift::ALL {
                let duty = self.walk(route, bus, shift, calling, km_per_percent, &mut state)?;
                calling = duty.last_end().unwrap_or(calling) + self.rules.shift_handover;
                schedule.push(duty);
            }
            debug!("{bus}: ends the day at {:.1}% charge", state.soc);
        }
        schedule.sort();
        Ok(schedule)
    }

    fn walk(
        &self,
        route:          &Route,
        bus:            BusId,
        shift:          Shift,
        calling:        Minutes,
        km_per_percent: f64,
        state:          &mut BusState,
    ) -> FleetResult<Duty> {
        let rules = &self.rules;
        let ceiling = rules.duty_ceiling;

        let mut duty = Duty::new(bus, shift);
        let mut now = calling;
        duty.push(Event::CallingTime { at: now })?;
        now += rules.readiness;
        duty.push(Event::Ready { at: now })?;
        let on_road_from = duty.worked_minutes();

        if route.turnout_from_depot {
            let km = route.turnout_km_at(&state.location);
            let minutes = self.timing.adjusted(route.turnout_minutes_at(&state.location), now, bus);
            duty.push(Event::Turnout(TripLeg {
                seq:         0,
                from:        DEPOT.to_owned(),
                to:          state.location.clone(),
                start:       now,
                end:         now + minutes,
                distance_km: km,
            }))?;
            state.soc -= km / km_per_percent;
            now += minutes;
        }

        let mut trips = 0u32;
        let mut break_taken = false;
        let reason = loop {
            let up = route.is_origin(&state.location);
            let (km, base, destination) = if up {
                (route.up_regular_km, route.up_minutes(), route.to.as_str())
            } else {
                (route.down_regular_km, route.down_minutes(), route.from.as_str())
            };
            let minutes = self.timing.adjusted(base, now, bus);
            let return_leg = route.turnout_minutes_at(destination);
            let worked = duty.worked_minutes();

            if state.soc - km / km_per_percent < rules.low_battery_buffer_pct {
                break DepotReturn::LowBattery;
            }
            if worked + minutes + return_leg > ceiling {
                break DepotReturn::EndOfShift;
            }
            if !break_taken
                && worked - on_road_from >= rules.early_break_min_work
                && worked + rules.break_duration <= ceiling
            {
                duty.push(Event::Break {
                    start:    now,
                    end:      now + rules.break_duration,
                    location: state.location.clone(),
                })?;
                now += rules.break_duration;
                break_taken = true;
                continue;
            }

            trips += 1;
            trace!("{bus} {shift}: trip {trips} at {:.1}% charge", state.soc);
            duty.push(Event::Trip(TripLeg {
                seq:         trips,
                from:        state.location.clone(),
                to:          destination.to_owned(),
                start:       now,
                end:         now + minutes,
                distance_km: km,
            }))?;
            state.soc -= km / km_per_percent;
            state.location = destination.to_owned();
            now += minutes;
        };

        let km = route.turnout_km_at(&state.location);
        let minutes = if route.turnout_from_depot {
            self.timing.adjusted(route.turnout_minutes_at(&state.location), now, bus)
        } else {
            0.0
        };
        debug!("{bus} {shift}: {} after {trips} trips", reason.label());
        duty.push(Event::ReturnToDepot {
            leg: TripLeg {
                seq:         trips,
                from:        state.location.clone(),
                to:          DEPOT.to_owned(),
                start:       now,
                end:         now + minutes,
                distance_km: km,
            },
            reason,
        })?;
        state.soc -= km / km_per_percent;
        now += minutes;

        duty.push(Event::SignOff { at: now })?;
        Ok(duty)
    }
}

impl DutyStrategy for FixedElectricGenerator {
    fn name(&self) -> &'static str {
        "electric-fixed"
    }

    fn generate(&self, route: &Route) -> FleetResult<Roster> {
        self.schedule(route).map(Roster::Duties)
    }
}
