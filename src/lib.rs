//! Choreo: interaction choreography engine
//!
//! Sequences the hover → commit → dive → hold transition and keeps a
//! continuous visual effect inside its frame budget on unknown hardware.

pub mod core;
pub mod types;

// =============================================================================
// CHOREOGRAPHY TIMING [C] - From the interaction design
// =============================================================================

/// Commit phase duration before auto-advance to Dive (milliseconds)
pub const COMMIT_DURATION_MS: u64 = 140;

/// Dive phase duration before auto-advance to Hold (milliseconds)
pub const DIVE_DURATION_MS: u64 = 780;

/// Hold settle window used by the hold progress curve (milliseconds)
pub const HOLD_SETTLE_MS: u64 = 160;

/// Dive progress at which the cross-page handoff payload is captured
pub const HANDOFF_DIVE_PROGRESS: f64 = 0.85;

// =============================================================================
// ADAPTIVE QUALITY [C] - Frame budget control loop
// =============================================================================

/// Telemetry window: samples required before the controller may act
/// (~1 second at 60 Hz)
pub const FRAME_WINDOW: usize = 60;

/// Mean frame duration above this is sustained pressure (< 50 fps)
pub const BAD_FRAME_MS: f64 = 20.0;

/// Mean frame duration below this is sustained headroom (> 71 fps)
pub const GOOD_FRAME_MS: f64 = 14.0;

/// Consecutive qualifying updates required before any scale change
pub const STREAK_THRESHOLD: u32 = 30;

/// Minimum quiet period between scale adjustments (milliseconds)
pub const ADJUST_COOLDOWN_MS: u64 = 1000;

/// Fixed scale step, same magnitude in both directions
pub const SCALE_STEP: f64 = 0.25;

/// Scale never drops below native resolution
pub const SCALE_FLOOR: f64 = 1.0;

/// Full tier never supersamples beyond 2x, whatever the pixel ratio
pub const FULL_SCALE_CAP: f64 = 2.0;

// =============================================================================
// DEVICE CLASSIFICATION [C]
// =============================================================================

/// Devices reporting less memory than this (GiB) classify as Safe
pub const SAFE_MEMORY_GB: f64 = 4.0;

/// Devices reporting fewer logical cores than this classify as Safe
pub const SAFE_MIN_CORES: u32 = 4;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
