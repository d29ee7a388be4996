//! Dynamic resolution controller
//!
//! Closed-loop AIMD-style control of a render scale factor from sampled
//! frame timings. Reacts only to *sustained* pressure or headroom: a
//! full telemetry window, a 30-update streak in one direction, and a
//! 1-second cooldown between adjustments. Single-frame spikes (GC pause,
//! tab switch) land in the dead zone or break the streak and change
//! nothing.
//!
//! Intended call cadence is ~1 Hz, not per-tick; staleness of up to a
//! second is an accepted property of the loop.

use crate::types::{QualityOutput, ReasonCode, Tier};
use crate::{ADJUST_COOLDOWN_MS, BAD_FRAME_MS, FRAME_WINDOW, GOOD_FRAME_MS, SCALE_FLOOR, SCALE_STEP, STREAK_THRESHOLD};

/// Tier-bounded render scale controller
#[derive(Debug)]
pub struct ResolutionController {
    tier: Tier,
    scale: f64,
    last_adjustment_ms: Option<u64>,
    good_streak: u32,
    bad_streak: u32,
}

impl ResolutionController {
    /// Create a controller starting at the tier ceiling for the given
    /// device pixel ratio: best quality first, degrade under pressure.
    pub fn new(tier: Tier, device_pixel_ratio: f64) -> Self {
        Self {
            tier,
            scale: tier.max_scale(device_pixel_ratio),
            last_adjustment_ms: None,
            good_streak: 0,
            bad_streak: 0,
        }
    }

    /// One control-loop update over the sampled window.
    ///
    /// `ceiling` must be re-derived by the caller from the tier and the
    /// *current* device pixel ratio on every call; it can move at runtime
    /// (window dragged between monitors) and is never cached here.
    pub fn update(&mut self, history: &[f64], now_ms: u64, ceiling: f64) -> QualityOutput {
        let ceiling = ceiling.max(SCALE_FLOOR);
        // A shrunken ceiling clamps immediately, outside the cooldown
        self.scale = self.scale.clamp(SCALE_FLOOR, ceiling);

        if history.len() < FRAME_WINDOW {
            return self.output(None, ReasonCode::R201_QUALITY_WARMUP);
        }

        let mean = history.iter().sum::<f64>() / history.len() as f64;

        let reason = if mean > BAD_FRAME_MS {
            self.bad_streak += 1;
            self.good_streak = 0;
            self.try_adjust(now_ms, -SCALE_STEP, ceiling)
        } else if mean < GOOD_FRAME_MS {
            self.good_streak += 1;
            self.bad_streak = 0;
            self.try_adjust(now_ms, SCALE_STEP, ceiling)
        } else {
            self.bad_streak = 0;
            self.good_streak = 0;
            ReasonCode::R202_QUALITY_DEAD_ZONE
        };

        self.output(Some(mean), reason)
    }

    /// Apply one step in the active direction if the streak and cooldown
    /// gates both pass. The streak keeps accumulating while the cooldown
    /// holds, so the adjustment lands as soon as the quiet period ends.
    fn try_adjust(&mut self, now_ms: u64, step: f64, ceiling: f64) -> ReasonCode {
        let streak = if step < 0.0 {
            self.bad_streak
        } else {
            self.good_streak
        };
        if streak < STREAK_THRESHOLD {
            return ReasonCode::R203_QUALITY_STREAK_BUILDING;
        }

        let cooldown_elapsed = self
            .last_adjustment_ms
            .map(|last| now_ms.saturating_sub(last) >= ADJUST_COOLDOWN_MS)
            .unwrap_or(true);
        if !cooldown_elapsed {
            return ReasonCode::R204_QUALITY_COOLDOWN_HELD;
        }

        let target = (self.scale + step).clamp(SCALE_FLOOR, ceiling);
        if step < 0.0 {
            self.bad_streak = 0;
        } else {
            self.good_streak = 0;
        }

        if target == self.scale {
            return if step < 0.0 {
                ReasonCode::R207_QUALITY_FLOOR_PINNED
            } else {
                ReasonCode::R208_QUALITY_CEILING_PINNED
            };
        }

        self.scale = target;
        self.last_adjustment_ms = Some(now_ms);
        if step < 0.0 {
            ReasonCode::R205_QUALITY_SCALE_DOWN
        } else {
            ReasonCode::R206_QUALITY_SCALE_UP
        }
    }

    /// Current render scale, always in [1.0, tier ceiling]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    fn output(&self, mean: Option<f64>, reason: ReasonCode) -> QualityOutput {
        QualityOutput {
            timestamp: chrono::Utc::now(),
            tier: self.tier,
            scale: self.scale,
            mean_frame_ms: mean,
            bad_streak: self.bad_streak,
            good_streak: self.good_streak,
            reason,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
