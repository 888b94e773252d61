//! Time-based gate between render frequency and sampling frequency

use std::time::{Duration, Instant};

/// Intervals reachable with the slow-down / speed-up keys.
const INTERVAL_LADDER_MS: [u64; 6] = [250, 500, 1000, 2000, 5000, 10_000];

/// Decides whether a render tick should poll the sample source.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_sample_time: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_sample_time: None,
        }
    }

    /// Returns true, and records `now`, when at least one interval has
    /// passed since the last accepted sample. The first call always passes.
    pub fn should_sample(&mut self, now: Instant) -> bool {
        let due = match self.last_sample_time {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if due {
            self.last_sample_time = Some(now);
        }
        due
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Changes the interval without resetting the last sample time.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Steps to the next slower interval on the ladder.
    ///
    /// Steps: 250ms → 500ms → 1s → 2s → 5s → 10s. An interval already past
    /// 10s is kept.
    pub fn slow_down(&mut self) {
        let current = self.interval.as_millis();
        if let Some(&next) = INTERVAL_LADDER_MS.iter().find(|&&ms| u128::from(ms) > current) {
            self.set_interval(Duration::from_millis(next));
        }
    }

    /// Steps to the next faster interval on the ladder.
    ///
    /// Steps: 10s → 5s → 2s → 1s → 500ms → 250ms. An interval already below
    /// 250ms is kept.
    pub fn speed_up(&mut self) {
        let current = self.interval.as_millis();
        if let Some(&next) = INTERVAL_LADDER_MS.iter().rev().find(|&&ms| u128::from(ms) < current) {
            self.set_interval(Duration::from_millis(next));
        }
    }

    /// Formats the interval for display, e.g. "2.0s" or "500ms".
    pub fn format_interval(&self) -> String {
        let ms = self.interval.as_millis();
        if ms >= 1000 {
            format!("{:.1}s", ms as f64 / 1000.0)
        } else {
            format!("{}ms", ms)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn test_sampling_cadence() {
        let base = Instant::now();
        let mut throttle = Throttle::new(Duration::from_millis(1000));

        let results: Vec<bool> = [0, 500, 999, 1000, 1500]
            .iter()
            .map(|&ms| throttle.should_sample(at(base, ms)))
            .collect();

        assert_eq!(results, vec![true, false, false, true, false]);
    }

    #[test]
    fn test_rejected_call_leaves_state_unchanged() {
        let base = Instant::now();
        let mut throttle = Throttle::new(Duration::from_millis(1000));
        assert!(throttle.should_sample(at(base, 0)));
        for ms in [100, 200, 300, 900] {
            assert!(!throttle.should_sample(at(base, ms)));
        }
        // Still measured from t=0, not from the rejected calls
        assert!(throttle.should_sample(at(base, 1000)));
    }

    #[test]
    fn test_set_interval_keeps_last_sample_time() {
        let base = Instant::now();
        let mut throttle = Throttle::new(Duration::from_millis(1000));
        assert!(throttle.should_sample(at(base, 0)));
        throttle.set_interval(Duration::from_millis(250));
        assert!(!throttle.should_sample(at(base, 200)));
        assert!(throttle.should_sample(at(base, 250)));
    }

    #[test]
    fn test_interval_ladder() {
        let mut throttle = Throttle::new(Duration::from_millis(1000));
        throttle.slow_down();
        assert_eq!(throttle.interval(), Duration::from_millis(2000));
        throttle.slow_down();
        throttle.slow_down();
        throttle.slow_down();
        assert_eq!(throttle.interval(), Duration::from_millis(10_000));

        let mut throttle = Throttle::new(Duration::from_millis(1000));
        throttle.speed_up();
        assert_eq!(throttle.interval(), Duration::from_millis(500));
        throttle.speed_up();
        throttle.speed_up();
        assert_eq!(throttle.interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_ladder_never_moves_the_wrong_way() {
        let mut throttle = Throttle::new(Duration::from_millis(60_000));
        throttle.slow_down();
        assert_eq!(throttle.interval(), Duration::from_millis(60_000));
        throttle.speed_up();
        assert_eq!(throttle.interval(), Duration::from_millis(10_000));

        let mut throttle = Throttle::new(Duration::from_millis(100));
        throttle.speed_up();
        assert_eq!(throttle.interval(), Duration::from_millis(100));
        throttle.slow_down();
        assert_eq!(throttle.interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_off_ladder_interval_snaps_to_neighbour() {
        let mut throttle = Throttle::new(Duration::from_millis(1500));
        throttle.slow_down();
        assert_eq!(throttle.interval(), Duration::from_millis(2000));

        let mut throttle = Throttle::new(Duration::from_millis(1500));
        throttle.speed_up();
        assert_eq!(throttle.interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(Throttle::new(Duration::from_millis(2000)).format_interval(), "2.0s");
        assert_eq!(Throttle::new(Duration::from_millis(500)).format_interval(), "500ms");
    }
}
