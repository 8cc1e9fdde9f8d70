//! `ChargerPool`: depot charger slots and their next-free minute.

use ft_core::{ChargerId, Minute, Minutes};

/// One booked charging session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChargeSlot {
    pub charger: ChargerId,
    pub start:   Minute,
    pub end:     Minute,
}

#[derive(Clone, Debug)]
pub struct ChargerPool {
    free_at: Vec<Minute>,
}

impl ChargerPool {
    /// `count` chargers, all free from midnight.
    pub fn new(count: u16) -> Self {
        Self { free_at: vec![Minute::MIDNIGHT; count as usize] }
    }

    /// Book the least-loaded charger for a bus that stopped driving at `stop`.
    ///
    /// Charging starts once both the bus and the charger are ready:
    /// `start = max(stop, free_at)`.  The first charger reaching the minimum
    /// free time wins ties.  The slot stays busy until `start + duration`.
    /// Returns `None` if the depot has no chargers.
    pub fn assign(&mut self, stop: Minute, duration: Minutes) -> Option<ChargeSlot> {
        let (index, free) = self
            .free_at
            .iter()
            .copied()
            .enumerate()
            .min_by_key(|&(i, free)| (free, i))?;
        let charger = ChargerId(u16::try_from(index).ok()?);
        let start = stop.max(free);
        let end = start.advance(duration);
        self.free_at[index] = end;
        Some(ChargeSlot { charger, start, end })
    }

    pub fn free_at(&self, charger: ChargerId) -> Option<Minute> {
        self.free_at.get(charger.index()).copied()
    }

    pub fn len(&self) -> usize {
        self.free_at.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free_at.is_empty()
    }
}
