// src/errors.rs

//! Crate-wide error types.
//!
//! Every failure that can occur while running a phase command is normalized
//! into a single [`PhaseError`] before it reaches the caller, carrying the
//! target name, the full command line, the resolved log path, and a
//! [`FailureKind`] from which a numeric code can be derived. Nothing is
//! retried and nothing is logged-and-swallowed; the surrounding driver
//! decides whether a failed phase aborts the whole run.

use std::path::PathBuf;

use thiserror::Error;

/// Sentinel used by [`PhaseError::code`] when no exit code is available
/// (empty command, signal termination, an OS error without an errno).
pub const NO_EXIT_CODE: i32 = -1;

/// Conventional shell exit code for a command that could not be found.
pub const NOT_FOUND_CODE: i32 = 127;

#[derive(Error, Debug)]
pub enum BuildpipeError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Phase(#[from] PhaseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BuildpipeError>;

/// The externally-visible failure of one phase command.
///
/// Raised by [`Session::run`](crate::session::Session::run) for everything
/// from "the executable does not exist" to "the child exited with status 3".
/// The distinction between those cases lives in [`kind`](Self::kind).
#[derive(Error, Debug)]
#[error("{target}: `{command}` {kind} (see {})", .log.display())]
pub struct PhaseError {
    /// Name of the target the command ran on behalf of.
    pub target: String,
    /// Phase the command belonged to.
    pub phase: String,
    /// The full command line, space-joined.
    pub command: String,
    /// The log file the command's output went to.
    pub log: PathBuf,
    pub kind: FailureKind,
}

impl PhaseError {
    /// Numeric code for drivers that report failures uniformly: the exit
    /// code for a normal nonzero exit, the OS error for launch and input
    /// failures, [`NOT_FOUND_CODE`] for a missing executable, and
    /// [`NO_EXIT_CODE`] when no code exists.
    pub fn code(&self) -> i32 {
        self.kind.code()
    }
}

/// What went wrong with a phase command.
///
/// A missing executable is reported by the spawn step itself, never
/// inferred from an exit status, so [`NotFound`](Self::NotFound) and
/// [`Exited`](Self::Exited) can never be confused with each other.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    #[error("was empty after dropping blank arguments")]
    EmptyCommand,

    #[error("could not be found")]
    NotFound,

    #[error("failed unexpectedly (OS error {0})")]
    Unexpected(i32),

    #[error("could not be fed its input (OS error {0})")]
    Input(i32),

    #[error("exited with status {0}")]
    Exited(i32),

    #[error("was terminated by a signal")]
    Signaled,
}

impl FailureKind {
    pub fn code(&self) -> i32 {
        match self {
            FailureKind::EmptyCommand | FailureKind::Signaled => NO_EXIT_CODE,
            FailureKind::NotFound => NOT_FOUND_CODE,
            FailureKind::Unexpected(code) | FailureKind::Input(code) | FailureKind::Exited(code) => {
                *code
            }
        }
    }

    pub(crate) fn unexpected(err: &std::io::Error) -> Self {
        FailureKind::Unexpected(err.raw_os_error().unwrap_or(NO_EXIT_CODE))
    }

    pub(crate) fn input(err: &std::io::Error) -> Self {
        FailureKind::Input(err.raw_os_error().unwrap_or(NO_EXIT_CODE))
    }
}
