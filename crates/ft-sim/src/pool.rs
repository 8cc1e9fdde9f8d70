//! `BusPool`: arena of physical buses and their service state.
//!
//! Each bus has exactly one [`BusState`], so a bus can never be both in
//! service and available.  `in_service_count() + available_count()` always
//! equals `len()`.

use ft_core::{BusId, Minute, WorkBlockId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BusState {
    /// In the depot pool; free to start a segment from `at`.
    Available { at: Minute },
    /// Driving a segment of `block`.
    InService { block: WorkBlockId },
}

#[derive(Clone, Debug)]
pub struct BusPool {
    states: Vec<BusState>,
}

impl BusPool {
    /// `count` buses, all available from midnight.
    pub fn new(count: u32) -> Self {
        Self { states: vec![BusState::Available { at: Minute::MIDNIGHT }; count as usize] }
    }

    /// Take the soonest-available bus out of the pool for `block`.
    ///
    /// Ties go to the lowest bus id.  Returns the bus and the minute it
    /// became available, or `None` when every bus is in service.
    pub fn checkout(&mut self, block: WorkBlockId) -> Option<(BusId, Minute)> {
        let (index, at) = self
            .states
            .iter()
            .enumerate()
            .filter_map(|(i, s)| match s {
                BusState::Available { at } => Some((i, *at)),
                BusState::InService { .. } => None,
            })
            .min_by_key(|&(i, at)| (at, i))?;
        let bus = BusId::try_from(index).ok()?;
        self.states[index] = BusState::InService { block };
        Some((bus, at))
    }

    /// Return `bus` to the pool, available from `at`.
    pub fn release(&mut self, bus: BusId, at: Minute) {
        if let Some(state) = self.states.get_mut(bus.index()) {
            *state = BusState::Available { at };
        }
    }

    pub fn state(&self, bus: BusId) -> Option<BusState> {
        self.states.get(bus.index()).copied()
    }

    pub fn in_service_count(&self) -> usize {
        self.states.iter().filter(|s| matches!(s, BusState::InService { .. })).count()
    }

    pub fn available_count(&self) -> usize {
        self.states.iter().filter(|s| matches!(s, BusState::Available { .. })).count()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
