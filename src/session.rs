// src/session.rs

//! The orchestration context owning all run-scoped state.
//!
//! Everything that would otherwise be process-global (the logfile
//! registry, the statistics aggregate, the cached processor count, the
//! parallel-level override) lives on a [`Session`] so long-lived drivers
//! and tests can construct a fresh one for isolation. A `Session` is
//! `Sync`: `run` may be called from several threads at once, each call
//! driving exactly one child process to completion.

use crate::config::ConfigFile;
use crate::cpus::ProcessorCount;
use crate::errors::PhaseError;
use crate::exec::{self, RunOptions, RunOutcome};
use crate::logfiles::LogfileRegistry;
use crate::parallel::ParallelLevel;
use crate::stats::StatsAggregator;
use crate::target::Target;

#[derive(Debug)]
pub struct Session {
    config: ConfigFile,
    cpus: ProcessorCount,
    parallel: ParallelLevel,
    logfiles: LogfileRegistry,
    stats: StatsAggregator,
}

impl Session {
    pub fn new(config: ConfigFile) -> Self {
        let parallel = ParallelLevel::new();
        if let Some(level) = config.build.parallel {
            parallel.set(level);
        }

        Self {
            config,
            cpus: ProcessorCount::new(),
            parallel,
            logfiles: LogfileRegistry::new(),
            stats: StatsAggregator::new(),
        }
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Detected processor count, memoized for the session's lifetime.
    pub fn processor_count(&self) -> usize {
        self.cpus.get()
    }

    /// Resolve the current parallel build level; see
    /// [`ParallelLevel::resolve_with`] for the override semantics.
    pub fn parallel_level(&self) -> usize {
        self.parallel.resolve_with(self.cpus.get())
    }

    pub fn set_parallel_level(&self, level: i64) {
        self.parallel.set(level);
    }

    /// The run-scoped logfile registry. Drivers clear it between
    /// independent runs so logs truncate again.
    pub fn logfiles(&self) -> &LogfileRegistry {
        &self.logfiles
    }

    /// The session-wide timing aggregate. Drivers reset it between
    /// independent runs.
    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    /// Run a phase command for a target, blocking until the child has
    /// terminated and its output is fully drained.
    pub fn run<T, S>(
        &self,
        target: &T,
        phase: &str,
        command: &[S],
    ) -> Result<RunOutcome, PhaseError>
    where
        T: Target + ?Sized,
        S: AsRef<str>,
    {
        exec::runner::run(self, target, phase, command, RunOptions::new())
    }

    /// Like [`run`](Self::run), with input files and/or a per-line output
    /// consumer.
    pub fn run_with<T, S>(
        &self,
        target: &T,
        phase: &str,
        command: &[S],
        options: RunOptions<'_>,
    ) -> Result<RunOutcome, PhaseError>
    where
        T: Target + ?Sized,
        S: AsRef<str>,
    {
        exec::runner::run(self, target, phase, command, options)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ConfigFile::default())
    }
}
