// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [log]
/// dir = "log"
/// keep_old = false
///
/// [build]
/// verbose = false
/// nice = 10
/// parallel = 4
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    /// Log-file placement and retention from `[log]`.
    #[serde(default)]
    pub log: LogSection,

    /// Child-process behaviour from `[build]`.
    #[serde(default)]
    pub build: BuildSection,
}

/// `[log]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LogSection {
    /// Directory phase logs and the stats log are written into.
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,

    /// Force append mode for every log, preserving output from previous
    /// runs. Without it, the first write to a path in a run truncates.
    #[serde(default)]
    pub keep_old: bool,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("log")
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            keep_old: false,
        }
    }
}

/// `[build]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BuildSection {
    /// Echo every child output line to stdout as well as the log. Takes
    /// priority over per-call line consumers.
    #[serde(default)]
    pub verbose: bool,

    /// Priority adjustment applied to children before they exec.
    #[serde(default)]
    pub nice: Option<i32>,

    /// Parallel build level override. Unset means "use the detected
    /// processor count"; zero or negative collapses to 1.
    #[serde(default)]
    pub parallel: Option<i64>,
}
