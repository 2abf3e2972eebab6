//! Fixed-timestep clock using an accumulator pattern.
//!
//! The host calls [`GameTime::update`] with wall-clock milliseconds at
//! whatever rate it renders; the clock answers with a whole number of
//! discrete ticks so game logic stays deterministic and testable.

/// Longest wall-clock gap credited in one update. A backgrounded tab does
/// not earn a burst of catch-up ticks.
pub const MAX_FRAME_GAP_MS: f64 = 500.0;

#[derive(Clone, Debug)]
pub struct GameTime {
    /// Milliseconds per tick (100ms = 10 ticks/sec)
    ms_per_tick: f64,
    /// Milliseconds not yet consumed as ticks
    accumulator: f64,
    pub total_ticks: u64,
    /// None until the first update, and again after `pause`
    last_timestamp: Option<f64>,
}

impl GameTime {
    /// `ticks_per_sec`: game ticks per real-time second (e.g. 10).
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp and get the number of ticks to run.
    ///
    /// The first update after creation or [`pause`](Self::pause) only
    /// records the timestamp and returns 0.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_GAP_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }

    /// Stop counting. Time between `pause` and the next `update` is dropped,
    /// along with any partial tick.
    pub fn pause(&mut self) {
        self.last_timestamp = None;
        self.accumulator = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.last_timestamp.is_some()
    }
}

/// `performance.now()` in the browser.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_returns_zero_ticks() {
        let mut gt = GameTime::new(10);
        assert!(!gt.is_running());
        assert_eq!(gt.update(5_000.0), 0);
        assert!(gt.is_running());
    }

    #[test]
    fn one_tick_per_100ms() {
        let mut gt = GameTime::new(10);
        gt.update(0.0);
        assert_eq!(gt.update(100.0), 1);
        assert_eq!(gt.update(350.0), 2); // 250ms → 2 ticks + 50ms carried
        assert_eq!(gt.update(400.0), 1); // 50ms + 50ms
        assert_eq!(gt.total_ticks, 4);
    }

    #[test]
    fn long_gaps_are_clamped() {
        let mut gt = GameTime::new(10);
        gt.update(0.0);
        assert_eq!(gt.update(60_000.0), 5);
    }

    #[test]
    fn clock_going_backwards_gives_no_ticks() {
        let mut gt = GameTime::new(10);
        gt.update(1_000.0);
        assert_eq!(gt.update(900.0), 0);
        assert_eq!(gt.update(1_000.0), 1);
    }

    #[test]
    fn pause_drops_idle_time_and_partial_ticks() {
        let mut gt = GameTime::new(10);
        gt.update(0.0);
        assert_eq!(gt.update(90.0), 0); // 90ms pending
        gt.pause();
        assert!(!gt.is_running());
        assert_eq!(gt.update(10_000.0), 0);
        assert_eq!(gt.update(10_050.0), 0); // pending restarted from 0
        assert_eq!(gt.update(10_100.0), 1);
    }

    #[test]
    fn steady_60fps_gives_ten_ticks_a_second() {
        let mut gt = GameTime::new(10);
        gt.update(0.0);
        let total: u32 = (1..=60).map(|i| gt.update(i as f64 * 16.667)).sum();
        assert!((9..=11).contains(&total), "expected ~10 ticks, got {total}");
    }
}
