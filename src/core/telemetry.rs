//! Frame telemetry sampler
//!
//! Records the wall-clock gap between successive render-loop ticks into a
//! bounded window (~1 second at 60 Hz). While the context is hidden no
//! samples are recorded and the reference tick is dropped, so resuming
//! from background never records the giant gap as a frame time.

use std::collections::VecDeque;

use crate::FRAME_WINDOW;

/// Bounded recent history of frame durations
#[derive(Debug)]
pub struct FrameTelemetry {
    /// Last tick time, cleared while hidden
    last_tick_ms: Option<u64>,
    /// Most recent frame durations in milliseconds, oldest first
    samples: VecDeque<f64>,
    /// Is the host context visible?
    visible: bool,
}

impl FrameTelemetry {
    pub fn new() -> Self {
        Self {
            last_tick_ms: None,
            samples: VecDeque::with_capacity(FRAME_WINDOW),
            visible: true,
        }
    }

    /// Record one render-loop tick at `now_ms`.
    ///
    /// The first tick (and the first after a resume) only primes the
    /// reference time; it produces no sample.
    pub fn tick(&mut self, now_ms: u64) {
        if !self.visible {
            return;
        }

        if let Some(last) = self.last_tick_ms {
            let delta = now_ms.saturating_sub(last) as f64;
            if self.samples.len() == FRAME_WINDOW {
                self.samples.pop_front();
            }
            self.samples.push_back(delta);
        }
        self.last_tick_ms = Some(now_ms);
    }

    /// Record an already-measured frame duration.
    ///
    /// Used when the host render loop reports deltas itself instead of
    /// raw tick timestamps. Ignored while hidden, like `tick`.
    pub fn record_sample(&mut self, duration_ms: f64) {
        if !self.visible || !duration_ms.is_finite() || duration_ms < 0.0 {
            return;
        }
        if self.samples.len() == FRAME_WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(duration_ms);
    }

    /// Suspend or resume sampling with context visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.last_tick_ms = None;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Read-only view of the recorded window, oldest first
    pub fn history(&self) -> &VecDeque<f64> {
        &self.samples
    }

    /// Copy the window out as a contiguous slice-friendly vec
    pub fn history_vec(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }

    /// Has a full window been accumulated?
    pub fn is_warm(&self) -> bool {
        self.samples.len() == FRAME_WINDOW
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Default for FrameTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_records_nothing() {
        let mut telemetry = FrameTelemetry::new();
        telemetry.tick(1000);
        assert!(telemetry.is_empty());
    }

    #[test]
    fn test_deltas_recorded_between_ticks() {
        let mut telemetry = FrameTelemetry::new();
        telemetry.tick(1000);
        telemetry.tick(1016);
        telemetry.tick(1033);
        assert_eq!(telemetry.history_vec(), vec![16.0, 17.0]);
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut telemetry = FrameTelemetry::new();
        let mut now = 0;
        telemetry.tick(now);
        for i in 0..FRAME_WINDOW as u64 + 5 {
            now += 10 + i % 2;
            telemetry.tick(now);
        }
        assert_eq!(telemetry.len(), FRAME_WINDOW);
        assert!(telemetry.is_warm());
    }

    #[test]
    fn test_hidden_context_records_no_gap() {
        let mut telemetry = FrameTelemetry::new();
        telemetry.tick(0);
        telemetry.tick(16);
        assert_eq!(telemetry.len(), 1);

        telemetry.set_visible(false);
        telemetry.tick(5000); // ignored while hidden
        telemetry.set_visible(true);
        telemetry.tick(10016); // primes only
        assert_eq!(telemetry.len(), 1);

        telemetry.tick(10032);
        assert_eq!(telemetry.history_vec(), vec![16.0, 16.0]);
    }
}
