// src/exec/log_watch.rs

//! Wait for a marker to appear on a long-running process's stdout.
//!
//! One stdout reader and one stderr reader forward what they see over an mpsc
//! channel; a single `select!` loop races that channel against the deadline,
//! the caller's [`CancelToken`] and the process's own exit. Whichever terminal
//! condition comes first decides the outcome, and the process is torn down
//! before the call returns on every path.

use std::time::{Duration, Instant};

use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::errors::{DockwrapError, Result};
use crate::exec::CancelToken;
use crate::exec::command::CommandSpec;
use crate::types::OnProcessExit;

const STDERR_CHUNK: usize = 4096;

/// Knobs for a single log watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    /// Deadline measured from spawn.
    pub timeout: Duration,
    /// Treat any stderr output as fatal.
    pub break_on_error: bool,
    /// Behaviour when the process exits before the marker appeared.
    pub on_exit: OnProcessExit,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            break_on_error: true,
            on_exit: OnProcessExit::Wait,
        }
    }
}

/// Successful log watch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMatch {
    /// The stdout line that contained the marker.
    pub line: String,
    /// Time from spawn until the match.
    pub elapsed: Duration,
    /// All stdout captured up to and including the matching line.
    pub output: String,
}

/// Terminal states of a watch. The implicit `Running` state is the loop in
/// [`watch_for_output`]; once one of these is reached nothing else happens
/// except teardown.
#[derive(Debug)]
enum WatchState {
    Matched(String),
    TimedOut,
    Failed(String),
    Exited(Option<i32>),
    Cancelled,
}

enum StreamEvent {
    Stdout(String),
    Stderr(String),
}

/// One raw stdout line without its terminator. Invalid UTF-8 is replaced, not
/// rejected, so later lines are still searched.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

/// A child process together with the tasks reading its pipes.
///
/// They are acquired together in [`WatchedProcess::spawn`] and released
/// together in [`WatchedProcess::shutdown`] (or on drop).
struct WatchedProcess {
    child: Child,
    readers: Vec<JoinHandle<()>>,
    exited: bool,
}

impl WatchedProcess {
    fn spawn(spec: &CommandSpec) -> Result<(Self, mpsc::Receiver<StreamEvent>)> {
        let mut child = spec
            .to_command()
            .spawn()
            .map_err(|source| DockwrapError::SpawnFailed {
                program: spec.program.clone(),
                source,
            })?;

        let (tx, rx) = mpsc::channel::<StreamEvent>(64);
        let mut readers = Vec::with_capacity(2);

        if let Some(stdout) = child.stdout.take() {
            let tx = tx.clone();
            readers.push(tokio::spawn(async move {
                let mut reader = BufReader::new(stdout);
                let mut buf = Vec::new();
                loop {
                    buf.clear();
                    match reader.read_until(b'\n', &mut buf).await {
                        Ok(0) => break,
                        Ok(_) => {
                            let line = decode_line(&buf);
                            if tx.send(StreamEvent::Stdout(line)).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            warn!(error = %e, "failed to read watched process stdout");
                            break;
                        }
                    }
                }
            }));
        }

        // Stderr is read in raw chunks: any bytes count, not just full lines.
        if let Some(mut stderr) = child.stderr.take() {
            readers.push(tokio::spawn(async move {
                let mut buf = vec![0u8; STDERR_CHUNK];
                loop {
                    match stderr.read(&mut buf).await {
                        Ok(0) => break,
                        Ok(n) => {
                            let chunk = String::from_utf8_lossy(&buf[..n]).into_owned();
                            if tx.send(StreamEvent::Stderr(chunk)).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            warn!(error = %e, "failed to read watched process stderr");
                            break;
                        }
                    }
                }
            }));
        }

        Ok((
            Self {
                child,
                readers,
                exited: false,
            },
            rx,
        ))
    }

    /// Kill the process (unless it already exited), reap it and stop the readers.
    async fn shutdown(mut self) {
        if !self.exited {
            if let Err(e) = self.child.kill().await {
                warn!(error = %e, "failed to kill watched process");
            }
            self.exited = true;
        }
        for reader in self.readers.drain(..) {
            reader.abort();
        }
    }
}

impl Drop for WatchedProcess {
    fn drop(&mut self) {
        // `kill_on_drop` takes care of the child itself.
        for reader in &self.readers {
            reader.abort();
        }
    }
}

/// Run `spec` and wait until a stdout line contains `marker`.
///
/// Outcomes:
/// - marker seen: `Ok(LogMatch)`
/// - deadline reached: [`DockwrapError::Timeout`], never earlier than
///   `options.timeout`
/// - stderr output with `break_on_error`: [`DockwrapError::UpstreamFatal`]
/// - natural exit with [`OnProcessExit::Fail`]: [`DockwrapError::ProcessExited`]
/// - `cancel` fired: [`DockwrapError::Cancelled`]
///
/// In every case the process has been terminated when this returns.
pub async fn watch_for_output(
    spec: &CommandSpec,
    marker: &str,
    options: &WatchOptions,
    cancel: &CancelToken,
) -> Result<LogMatch> {
    info!(
        cmd = %spec,
        marker = %marker,
        timeout_ms = options.timeout.as_millis() as u64,
        break_on_error = options.break_on_error,
        "starting log watch"
    );

    let started = Instant::now();
    let (mut process, mut rx) = WatchedProcess::spawn(spec)?;

    let deadline = sleep(options.timeout);
    tokio::pin!(deadline);

    let mut output = String::new();
    let mut errors = String::new();
    let mut streams_open = true;
    let mut exit_code: Option<Option<i32>> = None;
    let mut exit_handled = false;

    let state = loop {
        tokio::select! {
            _ = cancel.cancelled() => break WatchState::Cancelled,

            _ = &mut deadline => break WatchState::TimedOut,

            event = rx.recv(), if streams_open => match event {
                Some(StreamEvent::Stdout(line)) => {
                    debug!(cmd = %spec, "stdout: {}", line);
                    output.push_str(&line);
                    output.push('\n');
                    if line.contains(marker) {
                        break WatchState::Matched(line);
                    }
                }
                Some(StreamEvent::Stderr(chunk)) => {
                    debug!(cmd = %spec, "stderr: {}", chunk.trim_end());
                    errors.push_str(&chunk);
                    if options.break_on_error {
                        break WatchState::Failed(errors.clone());
                    }
                }
                None => streams_open = false,
            },

            status = process.child.wait(), if exit_code.is_none() => {
                process.exited = true;
                let code = status.ok().and_then(|s| s.code());
                debug!(cmd = %spec, exit_code = ?code, "watched process exited");
                exit_code = Some(code);
            }
        }

        // Natural exit: only decide once both pipes are fully drained.
        if let (Some(code), false, false) = (exit_code, streams_open, exit_handled) {
            exit_handled = true;
            if output.contains(marker) {
                let line = output
                    .lines()
                    .find(|l| l.contains(marker))
                    .unwrap_or(marker)
                    .to_string();
                break WatchState::Matched(line);
            }
            match options.on_exit {
                OnProcessExit::Fail => break WatchState::Exited(code),
                OnProcessExit::Wait => {
                    debug!(cmd = %spec, "process ended without marker; waiting for deadline");
                }
            }
        }
    };

    process.shutdown().await;
    let elapsed = started.elapsed();

    info!(
        cmd = %spec,
        marker = %marker,
        outcome = ?state,
        elapsed_ms = elapsed.as_millis() as u64,
        "log watch finished"
    );

    match state {
        WatchState::Matched(line) => Ok(LogMatch {
            line,
            elapsed,
            output,
        }),
        WatchState::TimedOut => Err(DockwrapError::Timeout {
            marker: marker.to_string(),
            elapsed,
        }),
        WatchState::Failed(stderr) => Err(DockwrapError::UpstreamFatal {
            marker: marker.to_string(),
            stderr,
        }),
        WatchState::Exited(code) => Err(DockwrapError::ProcessExited {
            marker: marker.to_string(),
            code,
        }),
        WatchState::Cancelled => Err(DockwrapError::Cancelled {
            marker: marker.to_string(),
        }),
    }
}
