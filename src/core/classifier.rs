//! Quality profile classifier
//!
//! One-shot classification of the host device into a coarse tier. The
//! first call decides; every later call returns the cached tier even if
//! the raw signals have changed. The cache is owned state, not a static,
//! so independent sessions (and tests) never interfere.

use crate::types::{DeviceSignals, Tier};
use crate::{SAFE_MEMORY_GB, SAFE_MIN_CORES};

/// Session-scoped tier classifier
#[derive(Debug, Default)]
pub struct QualityClassifier {
    cached: Option<Tier>,
}

impl QualityClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify the device, caching the first result.
    ///
    /// Safe if reduced motion is requested, memory is under 4 GiB, or
    /// fewer than 4 logical cores are reported. Absent signals never
    /// trigger Safe; a context reporting nothing classifies Full.
    pub fn classify(&mut self, signals: &DeviceSignals) -> Tier {
        if let Some(tier) = self.cached {
            return tier;
        }

        let low_memory = signals
            .device_memory_gb
            .map(|gb| gb < SAFE_MEMORY_GB)
            .unwrap_or(false);
        let few_cores = signals
            .cpu_cores
            .map(|cores| cores < SAFE_MIN_CORES)
            .unwrap_or(false);

        let tier = if signals.reduced_motion || low_memory || few_cores {
            Tier::Safe
        } else {
            Tier::Full
        };
        self.cached = Some(tier);
        tier
    }

    /// The cached tier, if classification has run
    pub fn tier(&self) -> Option<Tier> {
        self.cached
    }
}
