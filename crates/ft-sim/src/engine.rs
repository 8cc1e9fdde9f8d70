//! The `PoolSim` struct and its event loop.

use log::{debug, info, trace, warn};

use ft_core::event::DEPOT;
use ft_core::{
    BusId, DepotReturn, Duty, DutyRules, DutyStrategy, Event, FleetResult, Minute, Minutes,
    PoolParams, Roster, Route, Shift, TripLeg, TripTiming, WorkBlock, WorkBlockId,
};
use ft_duty::feasibility;

use crate::{BusPool, ChargerPool, DropReason, NoopObserver, SimObserver, WorkQueue, WorkRequest};

// ── Per-run state ─────────────────────────────────────────────────────────────

/// Everything one `run` mutates.  Built fresh per call so runs never share
/// state.
struct RunState {
    queue:    WorkQueue,
    buses:    BusPool,
    chargers: ChargerPool,
    blocks:   Vec<WorkBlock>,
}

/// One driven segment before it is filed under its work block.
struct Segment {
    duty:  Duty,
    stop:  Minute,
    km:    f64,
    trips: u32,
}

// ── PoolSim ───────────────────────────────────────────────────────────────────

/// Whole-day pooled electric simulation.
///
/// Create via [`PoolSimBuilder`][crate::PoolSimBuilder].
#[derive(Clone, Debug)]
pub struct PoolSim {
    pub(crate) params:   PoolParams,
    pub(crate) rules:    DutyRules,
    pub(crate) timing:   TripTiming,
    pub(crate) chargers: u16,
}

impl PoolSim {
    pub fn params(&self) -> &PoolParams {
        &self.params
    }

    pub fn rules(&self) -> &DutyRules {
        &self.rules
    }

    /// Simulate a full day on `route` and return every work block.
    ///
    /// # Errors
    ///
    /// [`ft_core::FleetError::Infeasible`] when the route's round trip is not
    /// positive or a full battery cannot cover one round trip.  Starved or
    /// late requests are not errors; they are reported to `observer` and
    /// dropped.  So is a request whose bus cannot finish a single adjusted
    /// round trip, which keeps every requeue strictly later than its pop.
    pub fn run<O: SimObserver>(&self, route: &Route, observer: &mut O) -> FleetResult<Vec<WorkBlock>> {
        let round_trip = feasibility::round_trip(route)?;
        let range = self.params.battery_range_hours * 60.0;
        feasibility::trips_per_charge(range, round_trip).inspect_err(|e| warn!("pooled: {e}"))?;

        let fleet = self.params.fleet_size;
        let horizon = Minute(self.rules.horizon);
        let mut state = self.seed(route, round_trip);

        while let Some((at, request)) = state.queue.pop() {
            if at >= horizon {
                debug!("{} {}: request at {at} past horizon", request.block, request.shift);
                observer.on_request_dropped(at, request, DropReason::Horizon);
                continue;
            }
            let Some((bus, available)) = state.buses.checkout(request.block) else {
                warn!("{} {}: no bus in the pool", request.block, request.shift);
                observer.on_request_dropped(at, request, DropReason::NoBus);
                continue;
            };
            let start = at.max(available);
            if start >= horizon {
                state.buses.release(bus, available);
                debug!("{} {}: next bus free at {start}, past horizon", request.block, request.shift);
                observer.on_request_dropped(at, request, DropReason::Horizon);
                continue;
            }

            debug!("{} {}: {bus} starts at {start}", request.block, request.shift);
            observer.on_segment_start(start, request, bus, &state.buses);
            let Segment { duty, stop, km, trips } = self.drive(route, bus, request.shift, start)?;
            if trips == 0 {
                state.buses.release(bus, available);
                warn!("{} {}: {bus} cannot complete a round trip from {start}", request.block, request.shift);
                observer.on_request_dropped(start, request, DropReason::NoProgress);
                continue;
            }

            match state.chargers.assign(stop, self.params.charging_time_hours * 60.0) {
                Some(slot) if slot.end.is_never() => {
                    debug!("{bus}: charging never finishes, retired");
                    observer.on_charge(bus, slot);
                    state.buses.release(bus, Minute::NEVER);
                }
                Some(slot) => {
                    debug!("{bus}: {} from {} to {}", slot.charger, slot.start, slot.end);
                    observer.on_charge(bus, slot);
                    state.buses.release(bus, slot.end);
                }
                None => state.buses.release(bus, Minute::NEVER),
            }
            observer.on_segment_end(stop, request, bus, &state.buses);

            let elapsed = stop.since(start);
            if elapsed as Minutes >= self.rules.duty_ceiling {
                if let Some(next) = request.shift.next() {
                    state.queue.push(stop, WorkRequest::new(request.block, next));
                }
            } else {
                state.queue.push(stop, request);
            }

            if let Some(block) = state.blocks.get_mut(request.block.index()) {
                block.total_km += km;
                block.total_minutes += elapsed as Minutes;
                block.segments.push(duty);
            }
        }

        let segments: usize = state.blocks.iter().map(|b| b.segments.len()).sum();
        info!("pooled: {fleet} work blocks, {segments} segments, {} buses", state.buses.len());
        observer.on_sim_end(&state.blocks);
        Ok(state.blocks)
    }

    /// Seed one shift-1 request per work block, `round_trip / fleet` apart.
    fn seed(&self, route: &Route, round_trip: Minutes) -> RunState {
        let fleet = self.params.fleet_size;
        let headway = if fleet > 0 { round_trip / fleet as Minutes } else { 1.0 };
        let first = Minute::parse(&self.params.calling_time);
        trace!("pooled: {} headway {headway:.1} min", route.route_number);

        let mut queue = WorkQueue::new();
        let mut blocks = Vec::with_capacity(fleet as usize);
        for i in 0..fleet {
            let block = WorkBlockId(i);
            queue.push(first.advance(i as Minutes * headway), WorkRequest::new(block, Shift::First));
            blocks.push(WorkBlock::new(block));
        }

        RunState {
            queue,
            buses: BusPool::new(self.params.total_buses),
            chargers: ChargerPool::new(self.chargers),
            blocks,
        }
    }

    // ── Segment walk ──────────────────────────────────────────────────────

    fn drive(&self, route: &Route, bus: BusId, shift: Shift, start: Minute) -> FleetResult<Segment> {
        let rules = &self.rules;
        let break_len = if self.params.break_duration > 0.0 {
            self.params.break_duration
        } else {
            rules.break_duration
        };

        let mut duty = Duty::new(bus, shift);
        let mut now = start.advance(rules.pooled_prep);
        duty.push(Event::Turnout(TripLeg {
            seq:         0,
            from:        DEPOT.to_owned(),
            to:          route.from.clone(),
            start:       start.as_minutes(),
            end:         now.as_minutes(),
            distance_km: 0.0,
        }))?;

        let mut battery = self.params.battery_range_hours * 60.0;
        let mut break_taken = false;
        let mut trips = 0u32;
        let mut km = 0.0;
        loop {
            let elapsed = now.since(start) as Minutes;
            let up = self.timing.adjusted(route.up_minutes(), now.as_minutes(), bus);
            let turn = now.advance(up);
            let down = self.timing.adjusted(route.down_minutes(), turn.as_minutes(), bus);
            let round = up + down;

            if elapsed >= rules.duty_ceiling || battery < round {
                break;
            }
            if !break_taken && elapsed >= rules.pooled_break_trigger {
                let end = now.advance(break_len);
                duty.push(Event::Break {
                    start:    now.as_minutes(),
                    end:      end.as_minutes(),
                    location: route.from.clone(),
                })?;
                now = end;
                break_taken = true;
                continue;
            }

            let back = turn.advance(down);
            trips += 1;
            duty.push(Event::Trip(TripLeg {
                seq:         trips,
                from:        route.from.clone(),
                to:          route.to.clone(),
                start:       now.as_minutes(),
                end:         turn.as_minutes(),
                distance_km: route.up_regular_km,
            }))?;
            trips += 1;
            duty.push(Event::Trip(TripLeg {
                seq:         trips,
                from:        route.to.clone(),
                to:          route.from.clone(),
                start:       turn.as_minutes(),
                end:         back.as_minutes(),
                distance_km: route.down_regular_km,
            }))?;
            now = back;
            battery -= round;
            km += route.round_trip_km();
        }

        duty.push(Event::ReturnToDepot {
            leg: TripLeg {
                seq:         trips,
                from:        route.from.clone(),
                to:          DEPOT.to_owned(),
                start:       now.as_minutes(),
                end:         now.as_minutes(),
                distance_km: 0.0,
            },
            reason: DepotReturn::Recharge,
        })?;
        duty.seal();
        Ok(Segment { duty, stop: now, km, trips })
    }
}

impl DutyStrategy for PoolSim {
    fn name(&self) -> &'static str {
        "electric-pooled"
    }

    fn generate(&self, route: &Route) -> FleetResult<Roster> {
        self.run(route, &mut NoopObserver).map(Roster::WorkBlocks)
    }
}
