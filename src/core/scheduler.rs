//! Deferred transition queue
//!
//! Auto-advance is the only place where time passes between a transition
//! being scheduled and applied. Entries are keyed by the generation they
//! were scheduled under; there is no cancel API. A reset or re-commit bumps
//! the generation, and the guard at fire time drops anything stale.

use std::collections::VecDeque;

use crate::types::Phase;

/// A transition scheduled to fire at a deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTransition {
    /// Engine time at which this fires (milliseconds)
    pub due_ms: u64,
    /// Generation the schedule was made under
    pub generation: u64,
    /// Phase the machine must still be in for the transition to apply
    pub from: Phase,
}

/// FIFO of pending deferred transitions
///
/// The queue stays short (at most one pending entry per commit sequence),
/// so a linear scan on drain is fine.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: VecDeque<ScheduledTransition>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a transition out of `from` at `due_ms`
    pub fn schedule(&mut self, due_ms: u64, generation: u64, from: Phase) {
        self.entries.push_back(ScheduledTransition {
            due_ms,
            generation,
            from,
        });
    }

    /// Pop every entry whose deadline has passed, in schedule order
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<ScheduledTransition> {
        let mut due = Vec::new();
        let mut remaining = VecDeque::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            if entry.due_ms <= now_ms {
                due.push(entry);
            } else {
                remaining.push_back(entry);
            }
        }
        self.entries = remaining;
        due
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
