//! Choreography engine: phase state machine with guarded auto-advance
//!
//! Phase transitions:
//! - IDLE → HOVER: pointer enters a pillar
//! - IDLE/HOVER → COMMIT: user commits to a pillar
//! - COMMIT → DIVE: auto-advance after 140 ms
//! - DIVE → HOLD: auto-advance after 780 ms
//! - any → IDLE: reset
//!
//! Deferred transitions are queued with the generation they were scheduled
//! under. At fire time the entry must still match both the generation and
//! the phase it was scheduled from, otherwise it is dropped as a no-op.
//! That guard is the central correctness property here: a fast
//! reset/re-commit cycle must never be corrupted by a stale timer.

use crate::types::{
    HandoffPayload, InputEvent, InteractionState, NormPoint, Phase, PhaseOutput, PillarRegistry,
    ReasonCode,
};
use crate::{COMMIT_DURATION_MS, DIVE_DURATION_MS, HANDOFF_DIVE_PROGRESS, HOLD_SETTLE_MS};

use super::clock::{Clock, SystemClock};
use super::scheduler::TimerQueue;

/// Interaction choreography engine
pub struct ChoreographyEngine {
    /// Current interaction state
    state: InteractionState,
    /// Pending deferred transitions
    queue: TimerQueue,
    /// Monotonic time source
    clock: Box<dyn Clock>,
    /// External pillar table, consulted only at handoff capture
    registry: PillarRegistry,
    /// Captured handoff payload, at most one per commit sequence
    handoff: Option<HandoffPayload>,
    /// Number of events applied
    update_count: u64,
}

impl std::fmt::Debug for ChoreographyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChoreographyEngine")
            .field("state", &self.state)
            .field("pending_timers", &self.queue.len())
            .field("handoff", &self.handoff)
            .field("update_count", &self.update_count)
            .finish()
    }
}

impl ChoreographyEngine {
    /// Create an engine on the real clock
    pub fn new(registry: PillarRegistry) -> Self {
        Self::with_clock(registry, Box::new(SystemClock::new()))
    }

    /// Create an engine on an injected clock (tests use `ManualClock`)
    pub fn with_clock(registry: PillarRegistry, clock: Box<dyn Clock>) -> Self {
        Self {
            state: InteractionState::new(),
            queue: TimerQueue::new(),
            clock,
            registry,
            handoff: None,
            update_count: 0,
        }
    }

    /// Apply one input event. Total: every event yields a defined output,
    /// rejected events leave the state unchanged.
    pub fn apply(&mut self, event: InputEvent) -> PhaseOutput {
        self.update_count += 1;
        match event {
            InputEvent::Hover { id } => self.set_hover(id),
            InputEvent::Commit { id, origin } => self.commit(id, origin),
            InputEvent::Reset => self.reset(),
        }
    }

    /// Hover handling. While committed, hover is pinned to the committed
    /// pillar regardless of what the pointer does.
    fn set_hover(&mut self, id: Option<String>) -> PhaseOutput {
        if self.state.phase.is_committed() {
            self.state.hovered_id = self.state.selected_id.clone();
            return self.output(ReasonCode::R102_HOVER_PINNED);
        }

        match id {
            Some(id) => {
                self.state.phase = Phase::Hover;
                self.state.hovered_id = Some(id);
                self.output(ReasonCode::R102_HOVER_SET)
            }
            None => {
                self.state.phase = Phase::Idle;
                self.state.hovered_id = None;
                self.output(ReasonCode::R102_HOVER_CLEARED)
            }
        }
    }

    /// Commit to a pillar. Only valid from IDLE/HOVER with a new id;
    /// anything else is rejected silently so duplicate input events
    /// (double-tap, pointer/keyboard race) cannot corrupt the sequence.
    fn commit(&mut self, id: String, origin: NormPoint) -> PhaseOutput {
        if self.state.phase.is_committed() {
            let reason = if self.state.selected_id.as_deref() == Some(id.as_str()) {
                ReasonCode::R103_COMMIT_REJECTED_DUPLICATE
            } else {
                ReasonCode::R103_COMMIT_REJECTED_PHASE
            };
            return self.output(reason);
        }

        let now = self.clock.now_ms();
        self.state.generation += 1;
        self.state.phase = Phase::Commit;
        self.state.hovered_id = Some(id.clone());
        self.state.selected_id = Some(id);
        self.state.rupture_origin = Some(origin);
        self.state.commit_started_ms = Some(now);
        self.handoff = None;

        self.queue
            .schedule(now + COMMIT_DURATION_MS, self.state.generation, Phase::Commit);

        self.output(ReasonCode::R103_COMMIT_ACCEPTED)
    }

    /// Clear everything back to IDLE. Pending timers are not cancelled;
    /// the generation bump makes them fail their guard at fire time.
    fn reset(&mut self) -> PhaseOutput {
        self.state.clear();
        self.handoff = None;
        self.output(ReasonCode::R105_RESET)
    }

    /// Drive the engine forward: fire due timers and capture the handoff.
    /// Called once per render-loop tick; returns one output per applied
    /// (or dropped) deferred transition, usually zero or one.
    pub fn tick(&mut self) -> Vec<PhaseOutput> {
        let now = self.clock.now_ms();
        let mut outputs = Vec::new();

        for entry in self.queue.drain_due(now) {
            let stale =
                entry.generation != self.state.generation || entry.from != self.state.phase;
            if stale {
                outputs.push(self.output(ReasonCode::R104_TIMER_STALE_DROPPED));
                continue;
            }

            // Anchor to the scheduled deadline, not the fire time: a tick
            // that arrives late must not stretch the choreography
            match entry.from {
                Phase::Commit => {
                    self.state.phase = Phase::Dive;
                    self.state.dive_started_ms = Some(entry.due_ms);
                    self.queue.schedule(
                        entry.due_ms + DIVE_DURATION_MS,
                        self.state.generation,
                        Phase::Dive,
                    );
                    outputs.push(self.output(ReasonCode::R104_AUTO_ADVANCE_DIVE));
                }
                Phase::Dive => {
                    self.state.phase = Phase::Hold;
                    self.state.hold_started_ms = Some(entry.due_ms);
                    outputs.push(self.output(ReasonCode::R104_AUTO_ADVANCE_HOLD));
                }
                // Nothing schedules out of the other phases
                _ => outputs.push(self.output(ReasonCode::R104_TIMER_STALE_DROPPED)),
            }
        }

        if let Some(output) = self.maybe_capture_handoff() {
            outputs.push(output);
        }

        outputs
    }

    /// Capture the cross-page payload the first time dive progress crosses
    /// the threshold. Hold also qualifies: a sparse tick schedule can land
    /// past the end of the dive without ever observing the crossing.
    /// Best effort: a registry miss falls back to the default tint rather
    /// than skipping the capture.
    fn maybe_capture_handoff(&mut self) -> Option<PhaseOutput> {
        if self.handoff.is_some() || !matches!(self.state.phase, Phase::Dive | Phase::Hold) {
            return None;
        }
        if self.dive_progress() < HANDOFF_DIVE_PROGRESS {
            return None;
        }

        let pillar_id = self.state.selected_id.clone()?;
        let tint = self.registry.tint_for(&pillar_id).to_string();
        let origin = self.state.rupture_origin.unwrap_or_default();
        self.handoff = Some(HandoffPayload::new(pillar_id, tint, origin));

        Some(self.output(ReasonCode::R301_HANDOFF_CAPTURED))
    }

    /// Dive progress in [0, 1]; 0 until the dive has started.
    ///
    /// Pure read, safe to call every tick; this is how the camera and
    /// overlay observe timing without running timers of their own.
    pub fn dive_progress(&self) -> f64 {
        self.progress_since(self.state.dive_started_ms, DIVE_DURATION_MS)
    }

    /// Hold progress in [0, 1]; 0 until the hold has started
    pub fn hold_progress(&self) -> f64 {
        self.progress_since(self.state.hold_started_ms, HOLD_SETTLE_MS)
    }

    fn progress_since(&self, started_ms: Option<u64>, duration_ms: u64) -> f64 {
        match started_ms {
            Some(start) => {
                let elapsed = self.clock.now_ms().saturating_sub(start) as f64;
                (elapsed / duration_ms as f64).clamp(0.0, 1.0)
            }
            None => 0.0,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Full state snapshot
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Captured handoff payload, if dive progressed far enough
    pub fn handoff(&self) -> Option<&HandoffPayload> {
        self.handoff.as_ref()
    }

    /// Number of deferred transitions still pending
    pub fn pending_timers(&self) -> usize {
        self.queue.len()
    }

    /// Number of events applied
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Get current output without applying anything
    pub fn current_output(&self) -> PhaseOutput {
        self.output(match self.state.phase {
            Phase::Idle => ReasonCode::R101_PHASE_IDLE,
            Phase::Hover => ReasonCode::R101_PHASE_HOVER,
            Phase::Commit => ReasonCode::R101_PHASE_COMMIT,
            Phase::Dive => ReasonCode::R101_PHASE_DIVE,
            Phase::Hold => ReasonCode::R101_PHASE_HOLD,
        })
    }

    fn output(&self, reason: ReasonCode) -> PhaseOutput {
        PhaseOutput {
            timestamp: chrono::Utc::now(),
            phase: self.state.phase,
            hovered_id: self.state.hovered_id.clone(),
            selected_id: self.state.selected_id.clone(),
            rupture_origin: self.state.rupture_origin,
            dive_progress: self.dive_progress(),
            hold_progress: self.hold_progress(),
            reason,
            handoff_ready: self.handoff.is_some(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
