//! Device quality tier and capability signals

use serde::{Deserialize, Serialize};

use crate::{FULL_SCALE_CAP, SCALE_FLOOR};

/// Coarse device capability tier, classified once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    /// Capable hardware, full effect with adaptive supersampling
    Full,
    /// Constrained hardware or reduced motion requested, native only
    Safe,
}

impl Tier {
    /// Maximum render scale for this tier at the given device pixel ratio.
    ///
    /// Re-derived on every controller update; the pixel ratio can change
    /// at runtime (window moved between monitors), so this is never cached.
    pub fn max_scale(&self, device_pixel_ratio: f64) -> f64 {
        match self {
            Tier::Full => device_pixel_ratio.clamp(SCALE_FLOOR, FULL_SCALE_CAP),
            Tier::Safe => SCALE_FLOOR,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tier::Full => "FULL",
            Tier::Safe => "SAFE",
        };
        write!(f, "{}", name)
    }
}

/// Static capability signals read once at session start.
///
/// Absent signals never push a device toward Safe; a context that reports
/// nothing at all classifies as Full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceSignals {
    /// The user asked for reduced motion
    #[serde(default)]
    pub reduced_motion: bool,
    /// Approximate device memory in GiB, if reported
    #[serde(default)]
    pub device_memory_gb: Option<f64>,
    /// Logical core count, if reported
    #[serde(default)]
    pub cpu_cores: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_tier_tracks_pixel_ratio_capped() {
        assert_eq!(Tier::Full.max_scale(1.5), 1.5);
        assert_eq!(Tier::Full.max_scale(3.0), 2.0);
        assert_eq!(Tier::Full.max_scale(0.5), 1.0);
    }

    #[test]
    fn test_safe_tier_is_native_only() {
        assert_eq!(Tier::Safe.max_scale(3.0), 1.0);
    }
}
