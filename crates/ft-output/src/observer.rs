//! `ChargeLogObserver<W>`: bridges `SimObserver` to a `TimetableWriter`.

use ft_core::BusId;
use ft_sim::{ChargeSlot, SimObserver};

use crate::row::ChargeSessionRow;
use crate::writer::TimetableWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that logs every charging session of a pooled run to a
/// [`TimetableWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct ChargeLogObserver<W: TimetableWriter> {
    writer:     W,
    sessions:   usize,
    last_error: Option<OutputError>,
}

impl<W: TimetableWriter> ChargeLogObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, sessions: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Sessions written so far.
    pub fn sessions(&self) -> usize {
        self.sessions
    }

    /// Unwrap the inner writer (e.g. to write the timetable after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TimetableWriter> SimObserver for ChargeLogObserver<W> {
    fn on_charge(&mut self, bus: BusId, slot: ChargeSlot) {
        let row = ChargeSessionRow::new(bus, slot);
        let result = self.writer.write_charge_sessions(&[row]);
        if result.is_ok() {
            self.sessions += 1;
        }
        self.store_err(result);
    }
}
