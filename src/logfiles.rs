// src/logfiles.rs

//! Record of log paths already written during the current run.
//!
//! Purely a deduplication record used to pick append-vs-truncate when a log
//! is opened; it owns no file handles. The driver clears it between
//! independent runs so the first write of the next run truncates again.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct LogfileRegistry {
    seen: Mutex<HashSet<PathBuf>>,
}

impl LogfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path`, returning whether it had already been registered.
    ///
    /// Query and update happen under one lock, so two decisions about the
    /// same path can never interleave and a log the runner is about to
    /// append to cannot be truncated by a second caller.
    pub fn check_and_register(&self, path: &Path) -> bool {
        !self.seen.lock().unwrap().insert(path.to_path_buf())
    }

    pub fn register(&self, path: &Path) {
        self.seen.lock().unwrap().insert(path.to_path_buf());
    }

    pub fn is_registered(&self, path: &Path) -> bool {
        self.seen.lock().unwrap().contains(path)
    }

    pub fn clear(&self) {
        self.seen.lock().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::LogfileRegistry;
    use std::path::Path;

    #[test]
    fn first_registration_reports_unseen() {
        let registry = LogfileRegistry::new();
        let path = Path::new("log/libfoo-configure.log");

        assert!(!registry.check_and_register(path));
        assert!(registry.check_and_register(path));
        assert!(registry.is_registered(path));
    }

    #[test]
    fn clear_forgets_everything() {
        let registry = LogfileRegistry::new();
        let path = Path::new("log/libfoo-build.log");

        registry.register(path);
        registry.clear();
        assert!(!registry.is_registered(path));
        assert!(!registry.check_and_register(path));
    }
}
