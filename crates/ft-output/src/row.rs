//! Plain data rows written by output backends.

use ft_core::{BusId, Minute, minutes_to_time};
use ft_sim::ChargeSlot;

/// One booked charging session from a pooled run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargeSessionRow {
    pub bus:     u32,
    pub charger: u16,
    pub start:   Minute,
    pub end:     Minute,
}

impl ChargeSessionRow {
    pub fn new(bus: BusId, slot: ChargeSlot) -> Self {
        Self {
            bus:     bus.ordinal(),
            charger: slot.charger.ordinal(),
            start:   slot.start,
            end:     slot.end,
        }
    }

    /// `[bus, charger, start, end, minutes]` as CSV fields.
    pub(crate) fn fields(&self) -> [String; 5] {
        [
            self.bus.to_string(),
            self.charger.to_string(),
            minutes_to_time(self.start.as_minutes()),
            minutes_to_time(self.end.as_minutes()),
            self.end.since(self.start).to_string(),
        ]
    }
}
