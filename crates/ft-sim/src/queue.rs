//! `WorkQueue`: time-ordered duty-start requests.
//!
//! `BTreeMap` keyed by minute, with a FIFO bucket per minute, so popping
//! always yields the globally earliest request and requests due at the same
//! minute come out in the order they were pushed.

use std::collections::{BTreeMap, VecDeque};

use ft_core::{Minute, Shift, WorkBlockId};

/// "Start (or continue) this work block's shift."
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WorkRequest {
    pub block: WorkBlockId,
    pub shift: Shift,
}

impl WorkRequest {
    pub fn new(block: WorkBlockId, shift: Shift) -> Self {
        Self { block, shift }
    }
}

#[derive(Default)]
pub struct WorkQueue {
    inner: BTreeMap<Minute, VecDeque<WorkRequest>>,
    /// Cached total request count for O(1) `len()`.
    total: usize,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `request` to start at `at`, behind any request already due then.
    pub fn push(&mut self, at: Minute, request: WorkRequest) {
        self.inner.entry(at).or_default().push_back(request);
        self.total += 1;
    }

    /// Remove and return the earliest request.
    pub fn pop(&mut self) -> Option<(Minute, WorkRequest)> {
        let mut entry = self.inner.first_entry()?;
        let at = *entry.key();
        let request = entry.get_mut().pop_front()?;
        if entry.get().is_empty() {
            entry.remove();
        }
        self.total -= 1;
        Some((at, request))
    }

    /// The earliest minute with at least one queued request.
    pub fn next_time(&self) -> Option<Minute> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
