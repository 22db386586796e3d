// src/exec/logfile.rs

//! Log-file plumbing: path layout, open modes, headers, the stats log.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{SecondsFormat, Utc};

/// Per-invocation stats log, one line per successful command:
/// `<target> <phase> <duration-in-seconds>`.
pub const STATS_FILE_NAME: &str = "stats.log";

/// One file per (target, phase) pair: `<dir>/<target>-<phase>.log`.
pub(crate) fn phase_log_path(dir: &Path, target: &str, phase: &str) -> PathBuf {
    dir.join(format!("{target}-{phase}.log"))
}

pub(crate) fn open(path: &Path, append: bool) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).write(true);
    if append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    options.open(path)
}

/// Write the invocation header: timestamp, the literal command line, and
/// the environment sorted by key. The environment dump is what makes a
/// failed configure or make reproducible from the log alone.
pub(crate) fn write_header(log: &mut File, command_line: &str) -> std::io::Result<()> {
    let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    writeln!(log, "{stamp}: running")?;
    writeln!(log, "    {command_line}")?;
    writeln!(log, "with environment:")?;

    let mut vars: Vec<(String, String)> = std::env::vars_os()
        .map(|(key, value)| {
            (
                key.to_string_lossy().into_owned(),
                value.to_string_lossy().into_owned(),
            )
        })
        .collect();
    vars.sort();

    for (key, value) in vars {
        writeln!(log, "  {key}={value}")?;
    }
    writeln!(log)
}

pub(crate) fn append_stat_line(
    dir: &Path,
    target: &str,
    phase: &str,
    duration: Duration,
) -> std::io::Result<()> {
    let mut stats = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(STATS_FILE_NAME))?;
    writeln!(stats, "{target} {phase} {}", duration.as_secs_f64())
}
