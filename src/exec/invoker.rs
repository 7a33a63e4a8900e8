// src/exec/invoker.rs

//! Run-to-completion process execution.

use std::time::Instant;

use tracing::{debug, info};

use crate::errors::{DockwrapError, Result};
use crate::exec::command::{CommandSpec, ExecutionResult};

/// Spawns real OS processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessInvoker;

impl ProcessInvoker {
    pub fn new() -> Self {
        Self
    }

    /// Run `spec` to completion and capture both output streams.
    ///
    /// - Exactly one spawn, no retries.
    /// - Stdout and stderr are drained while waiting, so a chatty process
    ///   cannot block on a full pipe, and stderr is always complete when the
    ///   exit code is inspected.
    /// - Exit code 0 yields an [`ExecutionResult`]; anything else is
    ///   [`DockwrapError::CommandFailed`] carrying the captured stderr.
    pub async fn execute(&self, spec: &CommandSpec) -> Result<ExecutionResult> {
        info!(cmd = %spec, "starting process");
        let started = Instant::now();

        let child = spec
            .to_command()
            .spawn()
            .map_err(|source| DockwrapError::SpawnFailed {
                program: spec.program.clone(),
                source,
            })?;

        let output = child.wait_with_output().await?;
        let duration = started.elapsed();

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        // A signal-terminated process has no exit code.
        let code = output.status.code().unwrap_or(-1);

        info!(
            cmd = %spec,
            exit_code = code,
            success = output.status.success(),
            elapsed_ms = duration.as_millis() as u64,
            "process exited"
        );
        debug!(cmd = %spec, stdout_bytes = stdout.len(), stderr_bytes = stderr.len());

        if !output.status.success() {
            return Err(DockwrapError::CommandFailed {
                program: spec.program.clone(),
                args: spec.args.clone(),
                code,
                stderr,
            });
        }

        Ok(ExecutionResult {
            exit_code: code,
            stdout,
            stderr,
            duration,
        })
    }
}
