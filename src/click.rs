//! Clicks-per-second readout.
//!
//! Purely informational: the sampler keeps the timestamps of recent clicks
//! and refreshes the displayed rate on a fixed cadence. It never touches the
//! score.

use std::collections::VecDeque;

use crate::time::GameTime;

/// Clicks older than this no longer count toward the rate.
pub const CLICK_WINDOW_MS: f64 = 1_000.0;

/// The displayed rate refreshes this many times per second (every 100ms).
pub const SAMPLES_PER_SEC: u32 = 10;

#[derive(Clone, Debug)]
pub struct ClickRateSampler {
    clicks: VecDeque<f64>,
    cadence: GameTime,
    rate: u32,
}

impl ClickRateSampler {
    pub fn new() -> Self {
        Self {
            clicks: VecDeque::new(),
            cadence: GameTime::new(SAMPLES_PER_SEC),
            rate: 0,
        }
    }

    pub fn record(&mut self, now_ms: f64) {
        self.clicks.push_back(now_ms);
        self.prune(now_ms);
    }

    /// Advance the sampler. The displayed rate is recomputed when at least
    /// one sampling interval has elapsed; returns whether it was.
    pub fn update(&mut self, now_ms: f64) -> bool {
        let first = !self.cadence.is_running();
        if self.cadence.update(now_ms) == 0 && !first {
            return false;
        }
        self.resample(now_ms);
        true
    }

    /// Clicks within the last second as of the most recent sample.
    pub fn rate(&self) -> u32 {
        self.rate
    }

    fn resample(&mut self, now_ms: f64) {
        self.prune(now_ms);
        self.rate = self.clicks.len() as u32;
    }

    fn prune(&mut self, now_ms: f64) {
        while self
            .clicks
            .front()
            .is_some_and(|&t| now_ms - t >= CLICK_WINDOW_MS)
        {
            self.clicks.pop_front();
        }
    }
}

impl Default for ClickRateSampler {
    fn default() -> Self {
        Self::new()
    }
}
