use web_time::{Duration, Instant};

/// Target interval between simulation ticks (~60 Hz).
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Most ticks a single frame will catch up on. Anything beyond is dropped.
pub const MAX_CATCH_UP: u64 = 8;

/// Turns wall-clock frames into a whole number of fixed-length ticks.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    start_time: Instant,
    tick_counter: u64,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    pub fn starting_at(interval: Duration, start_time: Instant) -> Self {
        Self {
            interval,
            start_time,
            tick_counter: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn ticks(&self) -> u64 {
        self.tick_counter
    }

    /// Number of ticks to run now so the simulation keeps pace with `now`.
    pub fn due(&mut self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.start_time);
        let target_ticks = (elapsed.as_secs_f64() / self.interval.as_secs_f64()).floor() as u64;

        let behind = target_ticks.saturating_sub(self.tick_counter);
        // Skip what we can't catch up on rather than replaying a burst
        self.tick_counter = target_ticks;

        behind.min(MAX_CATCH_UP)
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}
