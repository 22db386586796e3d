// src/exec/runner.rs

//! The subprocess runner: spawn a phase command, arbitrate its pipes,
//! write its log, and feed the timing statistics.
//!
//! Launch failure versus execution failure is decided by the spawn step
//! alone. On Unix, `Command::spawn` forks and holds a close-on-exec pipe in
//! the child; a successful exec closes it silently and a failed exec (or a
//! failed `pre_exec`) writes the OS error back before the child dies. Zero
//! bytes on that pipe mean the program is truly running: success is
//! verified by absence of data, so a missing executable can never be
//! mistaken for a program that ran and exited nonzero, and vice versa.
//!
//! Pipe ordering within one call is fixed: launch verdict, then input
//! feeding, then output draining, then the exit status. Feeding all input
//! before reading any output can in theory deadlock if the child fills the
//! output pipe while the parent is still writing input; this is a known,
//! accepted limit of the sequential design rather than something patched
//! over with threads.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::errors::{FailureKind, PhaseError};
use crate::exec::logfile;
use crate::session::Session;
use crate::target::Target;

/// Optional extras for one `run` call.
#[derive(Default)]
pub struct RunOptions<'a> {
    pub(crate) input_files: Vec<PathBuf>,
    pub(crate) line_consumer: Option<Box<dyn FnMut(&str) + 'a>>,
}

impl<'a> RunOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file whose contents are streamed into the child's stdin.
    /// Files are fed in the order they were added.
    pub fn input_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_files.push(path.into());
        self
    }

    /// Receive each output line after it has been written to the log.
    /// Verbose mode takes priority: while it is enabled the consumer is
    /// never invoked.
    pub fn on_line(mut self, consumer: impl FnMut(&str) + 'a) -> Self {
        self.line_consumer = Some(Box::new(consumer));
        self
    }
}

/// Successful completion of one phase command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Exit code of the child; always 0, since nonzero exits are errors.
    pub exit_code: i32,
    /// Wall-clock time from command normalization to reaped child.
    pub duration: Duration,
    /// The log file this invocation wrote to.
    pub log_path: PathBuf,
}

pub(crate) fn run<T, S>(
    session: &Session,
    target: &T,
    phase: &str,
    command: &[S],
    mut options: RunOptions<'_>,
) -> Result<RunOutcome, PhaseError>
where
    T: Target + ?Sized,
    S: AsRef<str>,
{
    let started = Instant::now();
    let target_name = target.name().to_string();

    // Drop empty arguments; what survives is the argv.
    let argv: Vec<String> = command
        .iter()
        .map(|arg| arg.as_ref())
        .filter(|arg| !arg.is_empty())
        .map(str::to_string)
        .collect();
    let command_line = argv.join(" ");

    let log_dir = target
        .log_dir()
        .unwrap_or_else(|| session.config().log.dir.clone());
    let log_path = logfile::phase_log_path(&log_dir, &target_name, phase);

    let fail = |kind: FailureKind| PhaseError {
        target: target_name.clone(),
        phase: phase.to_string(),
        command: command_line.clone(),
        log: log_path.clone(),
        kind,
    };

    if argv.is_empty() {
        return Err(fail(FailureKind::EmptyCommand));
    }

    info!(target = %target_name, phase = %phase, cmd = %command_line, "running phase command");

    // Append when the path was already written this run, or when the
    // driver wants old logs kept. Registration happens under the same lock
    // as the query so a second command for this (target, phase) can never
    // truncate what the first one wrote.
    let already_written = session.logfiles().check_and_register(&log_path);
    let append = already_written || session.config().log.keep_old;

    if let Err(err) = fs::create_dir_all(&log_dir) {
        return Err(fail(FailureKind::unexpected(&err)));
    }
    let mut log = match logfile::open(&log_path, append) {
        Ok(log) => log,
        Err(err) => return Err(fail(FailureKind::unexpected(&err))),
    };
    if let Err(err) = logfile::write_header(&mut log, &command_line) {
        return Err(fail(FailureKind::unexpected(&err)));
    }

    let mut cmd = Command::new(&argv[0]);
    cmd.args(&argv[1..]);

    let feeding_input = !options.input_files.is_empty();
    if feeding_input {
        cmd.stdin(Stdio::piped());
    }

    let verbose = session.config().build.verbose;
    let mut output_reader = None;
    if verbose || options.line_consumer.is_some() {
        // One anonymous pipe carries stdout and stderr interleaved, so the
        // log sees lines in the order the child produced them.
        let (reader, stdout_writer) = match io::pipe() {
            Ok(ends) => ends,
            Err(err) => return Err(fail(FailureKind::unexpected(&err))),
        };
        let stderr_writer = match stdout_writer.try_clone() {
            Ok(writer) => writer,
            Err(err) => return Err(fail(FailureKind::unexpected(&err))),
        };
        cmd.stdout(stdout_writer);
        cmd.stderr(stderr_writer);
        output_reader = Some(reader);
    } else {
        // No consumer and not verbose: the child writes straight into the
        // log file through its own descriptor clones.
        let stdout_log = match log.try_clone() {
            Ok(file) => file,
            Err(err) => return Err(fail(FailureKind::unexpected(&err))),
        };
        let stderr_log = match stdout_log.try_clone() {
            Ok(file) => file,
            Err(err) => return Err(fail(FailureKind::unexpected(&err))),
        };
        cmd.stdout(stdout_log);
        cmd.stderr(stderr_log);
    }

    #[cfg(unix)]
    if let Some(level) = session.config().build.nice {
        use std::os::unix::process::CommandExt;
        // Runs in the child between fork and exec. A failure here is
        // reported through the spawn control pipe, not the exit status.
        unsafe {
            cmd.pre_exec(move || {
                if libc::setpriority(libc::PRIO_PROCESS as _, 0, level) == -1 {
                    return Err(io::Error::last_os_error());
                }
                Ok(())
            });
        }
    }

    // The launch verdict. Spawn reads the child's close-on-exec pipe:
    // end-of-stream means the exec happened; an error payload decodes to
    // the launch taxonomy. Exit statuses play no part in this decision.
    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(fail(FailureKind::NotFound));
        }
        Err(err) => return Err(fail(FailureKind::unexpected(&err))),
    };
    // The Command still owns the parent copies of the child's pipe ends;
    // dropping it closes them, or the output reader would never see
    // end-of-stream.
    drop(cmd);

    if feeding_input {
        if let Some(mut stdin) = child.stdin.take() {
            for path in &options.input_files {
                let source = match File::open(path) {
                    Ok(file) => file,
                    Err(err) => {
                        reap(&mut child);
                        return Err(fail(FailureKind::input(&err)));
                    }
                };
                debug!(target = %target_name, input = %path.display(), "feeding input file");

                let mut source = BufReader::new(source);
                let mut line = Vec::new();
                loop {
                    line.clear();
                    let read = match source.read_until(b'\n', &mut line) {
                        Ok(read) => read,
                        Err(err) => {
                            reap(&mut child);
                            return Err(fail(FailureKind::input(&err)));
                        }
                    };
                    if read == 0 {
                        break;
                    }
                    if let Err(err) = stdin.write_all(&line) {
                        reap(&mut child);
                        return Err(fail(FailureKind::input(&err)));
                    }
                }
            }
            // Dropping stdin closes the pipe and signals end-of-input.
        }
    }

    if let Some(reader) = output_reader.take() {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = match reader.read_until(b'\n', &mut buf) {
                Ok(read) => read,
                Err(err) => {
                    reap(&mut child);
                    return Err(fail(FailureKind::unexpected(&err)));
                }
            };
            if read == 0 {
                break;
            }
            // Build tools are not guaranteed to emit UTF-8.
            let text = String::from_utf8_lossy(&buf);
            let line = text.trim_end_matches(['\n', '\r']);

            if let Err(err) = writeln!(log, "{line}") {
                reap(&mut child);
                return Err(fail(FailureKind::unexpected(&err)));
            }
            if verbose {
                println!("{line}");
            } else if let Some(consumer) = options.line_consumer.as_mut() {
                consumer(line);
            }
        }
    }

    let status = match child.wait() {
        Ok(status) => status,
        Err(err) => return Err(fail(FailureKind::unexpected(&err))),
    };
    let exit_code = match status.code() {
        Some(0) => 0,
        Some(code) => return Err(fail(FailureKind::Exited(code))),
        None => return Err(fail(FailureKind::Signaled)),
    };

    let duration = started.elapsed();
    info!(
        target = %target_name,
        phase = %phase,
        secs = duration.as_secs_f64(),
        "phase command finished"
    );

    session.stats().add(&target_name, phase, duration);
    if let Err(err) = logfile::append_stat_line(&log_dir, &target_name, phase, duration) {
        warn!(error = %err, "could not append to the stats log");
    }
    target.record_stat(phase, duration);

    Ok(RunOutcome {
        exit_code,
        duration,
        log_path,
    })
}

/// Kill and wait exactly once, so no error path leaves a zombie behind.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
