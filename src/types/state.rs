//! Interaction state owned by the choreography engine
//!
//! Timestamps are monotonic engine milliseconds, not wall clock, so the
//! whole struct is serializable and deterministic under a fake clock.

use serde::{Deserialize, Serialize};

use super::{NormPoint, Phase};

/// Full interaction state snapshot
///
/// `hovered_id` / `selected_id` are lookup keys into an external pillar
/// registry; the engine never owns or dereferences the pillars themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionState {
    /// Current phase
    pub phase: Phase,
    /// Pillar under the pointer, pinned to `selected_id` while committed
    pub hovered_id: Option<String>,
    /// Committed pillar, present exactly while phase is Commit/Dive/Hold
    pub selected_id: Option<String>,
    /// Where the commit happened, in normalized [-1,1] coordinates
    pub rupture_origin: Option<NormPoint>,
    /// When the commit phase started (engine milliseconds)
    pub commit_started_ms: Option<u64>,
    /// When the dive phase started
    pub dive_started_ms: Option<u64>,
    /// When the hold phase started
    pub hold_started_ms: Option<u64>,
    /// Bumped on every commit and reset; pending timers carry the
    /// generation they were scheduled under and are dropped on mismatch
    pub generation: u64,
}

impl InteractionState {
    /// Initial state: Idle with everything empty
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            hovered_id: None,
            selected_id: None,
            rupture_origin: None,
            commit_started_ms: None,
            dive_started_ms: None,
            hold_started_ms: None,
            generation: 0,
        }
    }

    /// Clear everything back to Idle, atomically, keeping the generation
    /// counter moving forward so stale timers cannot resurrect the old run
    pub fn clear(&mut self) {
        self.phase = Phase::Idle;
        self.hovered_id = None;
        self.selected_id = None;
        self.rupture_origin = None;
        self.commit_started_ms = None;
        self.dive_started_ms = None;
        self.hold_started_ms = None;
        self.generation += 1;
    }

    /// Check the structural invariants of the state machine
    ///
    /// - `selected_id` present iff committed
    /// - hover pinned to selection while committed
    /// - timestamps set in commit → dive → hold order
    pub fn invariants_hold(&self) -> bool {
        let committed = self.phase.is_committed();
        if self.selected_id.is_some() != committed {
            return false;
        }
        if committed && self.hovered_id != self.selected_id {
            return false;
        }
        if self.dive_started_ms.is_some() && self.commit_started_ms.is_none() {
            return false;
        }
        if self.hold_started_ms.is_some() && self.dive_started_ms.is_none() {
            return false;
        }
        true
    }
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new()
    }
}
