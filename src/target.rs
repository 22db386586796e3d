// src/target.rs

//! The collaborator contract for the logical unit a command runs on behalf
//! of (typically a package in a dependency graph).
//!
//! Capabilities beyond the name are optional and expressed as
//! default-implemented methods, so plain strings work as targets and richer
//! build-plugin objects can override what they support.

use std::path::PathBuf;
use std::time::Duration;

pub trait Target {
    /// Display name, used in log file names and statistics keys.
    fn name(&self) -> &str;

    /// Per-target log directory, overriding the configured one.
    fn log_dir(&self) -> Option<PathBuf> {
        None
    }

    /// Per-target statistics sink, invoked after every successful command
    /// in addition to the session-wide aggregate.
    fn record_stat(&self, _phase: &str, _duration: Duration) {}
}

impl Target for str {
    fn name(&self) -> &str {
        self
    }
}

impl Target for String {
    fn name(&self) -> &str {
        self
    }
}
