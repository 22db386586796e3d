// src/stats.rs

//! Cumulative per-(target, phase) timing statistics.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

/// In-memory aggregate of wall-clock durations, keyed by (target, phase).
///
/// Slots are created lazily on the first sample and only ever added to,
/// never replaced. State lives until [`reset`](Self::reset); the driver
/// calls that between independent runs. The per-invocation stats log file
/// is written by the runner and is independent of this aggregate.
#[derive(Debug, Default)]
pub struct StatsAggregator {
    totals: Mutex<BTreeMap<(String, String), Duration>>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, target: &str, phase: &str, duration: Duration) {
        let mut totals = self.totals.lock().unwrap();
        *totals
            .entry((target.to_string(), phase.to_string()))
            .or_default() += duration;
    }

    pub fn total(&self, target: &str, phase: &str) -> Option<Duration> {
        self.totals
            .lock()
            .unwrap()
            .get(&(target.to_string(), phase.to_string()))
            .copied()
    }

    pub fn snapshot(&self) -> BTreeMap<(String, String), Duration> {
        self.totals.lock().unwrap().clone()
    }

    pub fn reset(&self) {
        self.totals.lock().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::StatsAggregator;
    use std::time::Duration;

    #[test]
    fn samples_accumulate_per_key() {
        let stats = StatsAggregator::new();
        stats.add("libfoo", "configure", Duration::from_secs(2));
        stats.add("libfoo", "configure", Duration::from_secs(3));
        stats.add("libfoo", "build", Duration::from_secs(10));

        assert_eq!(stats.total("libfoo", "configure"), Some(Duration::from_secs(5)));
        assert_eq!(stats.total("libfoo", "build"), Some(Duration::from_secs(10)));
        assert_eq!(stats.total("libbar", "configure"), None);
    }

    #[test]
    fn reset_clears_all_slots() {
        let stats = StatsAggregator::new();
        stats.add("libfoo", "build", Duration::from_secs(1));
        stats.reset();

        assert!(stats.snapshot().is_empty());
        assert_eq!(stats.total("libfoo", "build"), None);
    }
}
