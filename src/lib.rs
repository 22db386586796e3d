// src/lib.rs

//! Subprocess execution engine for build orchestration.
//!
//! `buildpipe` drives external build tools (configure scripts, make, cmake,
//! code generators) as child processes on behalf of a higher-level
//! dependency-task graph. It distinguishes "the executable could not be
//! launched" from "the executable ran and failed" without exit-status
//! heuristics, streams the child's combined output into deduplicated
//! per-(target, phase) log files, optionally feeds stdin from input files,
//! and records cumulative wall-clock statistics per target and phase.
//!
//! The scheduler deciding *which* commands to run, and in what dependency
//! order, is somebody else's job; this crate is the engine those callers
//! invoke one blocking [`Session::run`] at a time.
//!
//! ```no_run
//! # fn main() -> Result<(), buildpipe::PhaseError> {
//! use buildpipe::{ConfigFile, Session};
//!
//! let session = Session::new(ConfigFile::default());
//! session.run("libfoo", "configure", &["./configure", "--prefix=/opt"])?;
//! session.run("libfoo", "build", &["make", "-j4"])?;
//!
//! let built = session.stats().total("libfoo", "build");
//! println!("libfoo built in {built:?}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod cpus;
pub mod errors;
pub mod exec;
pub mod logfiles;
pub mod logging;
pub mod parallel;
pub mod session;
pub mod stats;
pub mod target;

pub use config::{ConfigFile, load_and_validate, load_from_path};
pub use errors::{BuildpipeError, FailureKind, NO_EXIT_CODE, NOT_FOUND_CODE, PhaseError, Result};
pub use exec::{RunOptions, RunOutcome, STATS_FILE_NAME};
pub use session::Session;
pub use target::Target;
