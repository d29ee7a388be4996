//! Output structures for terminal display and the API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{NormPoint, Phase, ReasonCode, Tier};

/// Output structure for each choreography update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Current phase
    pub phase: Phase,
    /// Pillar under the pointer
    pub hovered_id: Option<String>,
    /// Committed pillar
    pub selected_id: Option<String>,
    /// Where the rupture opened
    pub rupture_origin: Option<NormPoint>,
    /// Dive progress in [0, 1]
    pub dive_progress: f64,
    /// Hold progress in [0, 1]
    pub hold_progress: f64,
    /// Reason for this output
    pub reason: ReasonCode,
    /// Has the handoff payload been captured?
    pub handoff_ready: bool,
}

impl PhaseOutput {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.phase.color_code();
        let reset = Phase::color_reset();
        let emoji = self.phase.emoji();
        let target = self
            .selected_id
            .as_deref()
            .or(self.hovered_id.as_deref())
            .unwrap_or("-");

        format!(
            "{}{} phase={} | target={} | dive={:.2} hold={:.2} | {}{}",
            color,
            emoji,
            self.phase,
            target,
            self.dive_progress,
            self.hold_progress,
            self.reason.code(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "phase={} hovered={} selected={} dive={:.3} hold={:.3} reason={}",
            self.phase,
            self.hovered_id.as_deref().unwrap_or("-"),
            self.selected_id.as_deref().unwrap_or("-"),
            self.dive_progress,
            self.hold_progress,
            self.reason.code()
        )
    }
}

/// Output structure for each quality controller update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Session quality tier
    pub tier: Tier,
    /// Current render scale
    pub scale: f64,
    /// Mean frame duration over the window, if the window was full
    pub mean_frame_ms: Option<f64>,
    /// Consecutive pressure windows observed
    pub bad_streak: u32,
    /// Consecutive headroom windows observed
    pub good_streak: u32,
    /// Reason for this output
    pub reason: ReasonCode,
}

impl QualityOutput {
    /// Format for terminal display
    pub fn to_terminal_string(&self) -> String {
        let mean = self
            .mean_frame_ms
            .map(|m| format!("{:.1}ms", m))
            .unwrap_or_else(|| "-".to_string());

        format!(
            "🎚 tier={} scale={:.2} | mean={} | streaks -{}/+{} | {}",
            self.tier, self.scale, mean, self.bad_streak, self.good_streak,
            self.reason.code()
        )
    }

    /// Format for parseable output
    pub fn to_parseable_string(&self) -> String {
        format!(
            "tier={} scale={:.2} mean={} bad={} good={} reason={}",
            self.tier,
            self.scale,
            self.mean_frame_ms
                .map(|m| format!("{:.2}", m))
                .unwrap_or_else(|| "-".to_string()),
            self.bad_streak,
            self.good_streak,
            self.reason.code()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parseable_string_has_no_ansi() {
        let output = PhaseOutput {
            timestamp: Utc::now(),
            phase: Phase::Hover,
            hovered_id: Some("execution".into()),
            selected_id: None,
            rupture_origin: None,
            dive_progress: 0.0,
            hold_progress: 0.0,
            reason: ReasonCode::R102_HOVER_SET,
            handoff_ready: false,
        };
        let line = output.to_parseable_string();
        assert!(!line.contains('\x1b'));
        assert!(line.contains("phase=HOVER"));
        assert!(line.contains("R102_HOVER_SET"));
    }
}
