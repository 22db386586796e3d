// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! The crate itself only emits events; installing a subscriber is up to the
//! embedding driver. This helper is for drivers and test binaries that want
//! the default setup. Priority for determining the filter:
//! 1. explicit directives passed by the driver
//! 2. `BUILDPIPE_LOG` environment variable (e.g. "info", "buildpipe=debug")
//! 3. default to `info`

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialise the global logging subscriber.
///
/// Safe to call once at startup; a second call panics, as with any global
/// subscriber installation.
pub fn init_logging(directives: Option<&str>) -> Result<()> {
    let filter = match directives {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_env("BUILDPIPE_LOG")
            .unwrap_or_else(|_| EnvFilter::new("info")),
    };

    fmt().with_env_filter(filter).with_target(true).init();

    Ok(())
}
