// src/parallel.rs

//! System-wide default for how many build actions may run concurrently.
//!
//! This is a hint consumed by external schedulers; the execution engine
//! itself always runs exactly one child per `run` call.

use std::sync::Mutex;

/// Parallel build level with override/fallback semantics.
///
/// Without an override, the level is whatever the processor detector
/// reports. An override of zero or less means "disable parallelism" and
/// collapses to strictly sequential (1), never 0.
#[derive(Debug, Default)]
pub struct ParallelLevel {
    level: Mutex<Option<i64>>,
}

impl ParallelLevel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an override. Takes effect on the next resolution; callers
    /// may query the level per call, not only once at startup.
    pub fn set(&self, level: i64) {
        *self.level.lock().unwrap() = Some(level);
    }

    /// Drop the override, falling back to the detected processor count.
    pub fn unset(&self) {
        *self.level.lock().unwrap() = None;
    }

    pub fn resolve_with(&self, detected: usize) -> usize {
        match *self.level.lock().unwrap() {
            None => detected,
            Some(level) if level <= 0 => 1,
            Some(level) => level as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ParallelLevel;

    #[test]
    fn unset_resolves_to_detected_count() {
        let level = ParallelLevel::new();
        assert_eq!(level.resolve_with(8), 8);
    }

    #[test]
    fn zero_and_negative_collapse_to_sequential() {
        let level = ParallelLevel::new();
        level.set(0);
        assert_eq!(level.resolve_with(8), 1);
        level.set(-3);
        assert_eq!(level.resolve_with(8), 1);
    }

    #[test]
    fn positive_override_wins_verbatim() {
        let level = ParallelLevel::new();
        level.set(5);
        assert_eq!(level.resolve_with(8), 5);
    }

    #[test]
    fn unset_restores_fallback() {
        let level = ParallelLevel::new();
        level.set(2);
        level.unset();
        assert_eq!(level.resolve_with(4), 4);
    }
}
