//! Reason codes for transition decisions and quality adjustments
//!
//! Every output carries one of these, so logs and API consumers can tell
//! *why* the engine did (or refused to do) something without diffing state.

use serde::{Deserialize, Serialize};

/// Reason codes for all state changes and decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R101: Phase status (no transition)
    // =========================================================================
    /// Phase is IDLE, nothing targeted
    R101_PHASE_IDLE,
    /// Phase is HOVER, pillar targeted
    R101_PHASE_HOVER,
    /// Phase is COMMIT, rupture opening
    R101_PHASE_COMMIT,
    /// Phase is DIVE, traveling
    R101_PHASE_DIVE,
    /// Phase is HOLD, arrived
    R101_PHASE_HOLD,

    // =========================================================================
    // R102: Hover
    // =========================================================================
    /// Hover target set, entering or staying in HOVER
    R102_HOVER_SET,
    /// Hover cleared, returning to IDLE
    R102_HOVER_CLEARED,
    /// Hover forced to the committed pillar while in COMMIT/DIVE/HOLD
    R102_HOVER_PINNED,

    // =========================================================================
    // R103: Commit
    // =========================================================================
    /// Commit accepted, entering COMMIT
    R103_COMMIT_ACCEPTED,
    /// Commit rejected: pillar already selected
    R103_COMMIT_REJECTED_DUPLICATE,
    /// Commit rejected: not in IDLE or HOVER
    R103_COMMIT_REJECTED_PHASE,

    // =========================================================================
    // R104: Timers
    // =========================================================================
    /// Auto-advance fired, COMMIT → DIVE
    R104_AUTO_ADVANCE_DIVE,
    /// Auto-advance fired, DIVE → HOLD
    R104_AUTO_ADVANCE_HOLD,
    /// Deferred timer lost its guard check, dropped as a no-op
    R104_TIMER_STALE_DROPPED,

    // =========================================================================
    // R105: Reset
    // =========================================================================
    /// Reset applied, everything cleared
    R105_RESET,

    // =========================================================================
    // R2xx: Quality control loop
    // =========================================================================
    /// History shorter than the window, controller warming up
    R201_QUALITY_WARMUP,
    /// Mean frame time inside the dead zone, streaks reset
    R202_QUALITY_DEAD_ZONE,
    /// Qualifying window observed, streak not yet long enough
    R203_QUALITY_STREAK_BUILDING,
    /// Streak satisfied but cooldown not elapsed
    R204_QUALITY_COOLDOWN_HELD,
    /// Sustained pressure, scale stepped down
    R205_QUALITY_SCALE_DOWN,
    /// Sustained headroom, scale stepped up
    R206_QUALITY_SCALE_UP,
    /// Down-step requested but scale already at the floor
    R207_QUALITY_FLOOR_PINNED,
    /// Up-step requested but scale already at the tier ceiling
    R208_QUALITY_CEILING_PINNED,

    // =========================================================================
    // R3xx: Handoff
    // =========================================================================
    /// Dive progress crossed the capture threshold, payload captured
    R301_HANDOFF_CAPTURED,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R101_PHASE_IDLE => "R101_PHASE_IDLE",
            Self::R101_PHASE_HOVER => "R101_PHASE_HOVER",
            Self::R101_PHASE_COMMIT => "R101_PHASE_COMMIT",
            Self::R101_PHASE_DIVE => "R101_PHASE_DIVE",
            Self::R101_PHASE_HOLD => "R101_PHASE_HOLD",
            Self::R102_HOVER_SET => "R102_HOVER_SET",
            Self::R102_HOVER_CLEARED => "R102_HOVER_CLEARED",
            Self::R102_HOVER_PINNED => "R102_HOVER_PINNED",
            Self::R103_COMMIT_ACCEPTED => "R103_COMMIT_ACCEPTED",
            Self::R103_COMMIT_REJECTED_DUPLICATE => "R103_COMMIT_REJECTED_DUPLICATE",
            Self::R103_COMMIT_REJECTED_PHASE => "R103_COMMIT_REJECTED_PHASE",
            Self::R104_AUTO_ADVANCE_DIVE => "R104_AUTO_ADVANCE_DIVE",
            Self::R104_AUTO_ADVANCE_HOLD => "R104_AUTO_ADVANCE_HOLD",
            Self::R104_TIMER_STALE_DROPPED => "R104_TIMER_STALE_DROPPED",
            Self::R105_RESET => "R105_RESET",
            Self::R201_QUALITY_WARMUP => "R201_QUALITY_WARMUP",
            Self::R202_QUALITY_DEAD_ZONE => "R202_QUALITY_DEAD_ZONE",
            Self::R203_QUALITY_STREAK_BUILDING => "R203_QUALITY_STREAK_BUILDING",
            Self::R204_QUALITY_COOLDOWN_HELD => "R204_QUALITY_COOLDOWN_HELD",
            Self::R205_QUALITY_SCALE_DOWN => "R205_QUALITY_SCALE_DOWN",
            Self::R206_QUALITY_SCALE_UP => "R206_QUALITY_SCALE_UP",
            Self::R207_QUALITY_FLOOR_PINNED => "R207_QUALITY_FLOOR_PINNED",
            Self::R208_QUALITY_CEILING_PINNED => "R208_QUALITY_CEILING_PINNED",
            Self::R301_HANDOFF_CAPTURED => "R301_HANDOFF_CAPTURED",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R101_PHASE_IDLE => "Idle, nothing targeted",
            Self::R101_PHASE_HOVER => "Hovering a pillar",
            Self::R101_PHASE_COMMIT => "Committed, rupture opening",
            Self::R101_PHASE_DIVE => "Diving through the rupture",
            Self::R101_PHASE_HOLD => "Arrived, holding",
            Self::R102_HOVER_SET => "Hover target set",
            Self::R102_HOVER_CLEARED => "Hover cleared",
            Self::R102_HOVER_PINNED => "Hover pinned to committed pillar",
            Self::R103_COMMIT_ACCEPTED => "Commit accepted",
            Self::R103_COMMIT_REJECTED_DUPLICATE => "Pillar already selected",
            Self::R103_COMMIT_REJECTED_PHASE => "Commit only valid from Idle or Hover",
            Self::R104_AUTO_ADVANCE_DIVE => "Commit window elapsed, diving",
            Self::R104_AUTO_ADVANCE_HOLD => "Dive complete, holding",
            Self::R104_TIMER_STALE_DROPPED => "Stale timer dropped by guard",
            Self::R105_RESET => "Reset to Idle",
            Self::R201_QUALITY_WARMUP => "Telemetry window not yet full",
            Self::R202_QUALITY_DEAD_ZONE => "Frame times nominal",
            Self::R203_QUALITY_STREAK_BUILDING => "Pressure/headroom streak building",
            Self::R204_QUALITY_COOLDOWN_HELD => "Adjustment held by cooldown",
            Self::R205_QUALITY_SCALE_DOWN => "Sustained pressure, quality reduced",
            Self::R206_QUALITY_SCALE_UP => "Sustained headroom, quality raised",
            Self::R207_QUALITY_FLOOR_PINNED => "Already at native resolution",
            Self::R208_QUALITY_CEILING_PINNED => "Already at tier ceiling",
            Self::R301_HANDOFF_CAPTURED => "Handoff payload captured",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_matches_variant_name() {
        assert_eq!(
            ReasonCode::R103_COMMIT_ACCEPTED.code(),
            "R103_COMMIT_ACCEPTED"
        );
        assert_eq!(
            ReasonCode::R205_QUALITY_SCALE_DOWN.code(),
            "R205_QUALITY_SCALE_DOWN"
        );
    }

    #[test]
    fn test_descriptions_nonempty() {
        assert!(!ReasonCode::R104_TIMER_STALE_DROPPED.description().is_empty());
    }
}
