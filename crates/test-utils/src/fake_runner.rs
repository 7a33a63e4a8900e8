use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dockwrap::errors::{DockwrapError, Result};
use dockwrap::exec::{
    BoxFuture, CancelToken, CommandRunner, CommandSpec, ExecutionResult, LogMatch, WatchOptions,
};

/// Canned answer for one subcommand.
#[derive(Debug, Clone, Default)]
pub struct FakeResponse {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl FakeResponse {
    pub fn ok(stdout: &str) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: &str) -> Self {
        Self {
            exit_code: code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

/// A fake runner that:
/// - records every argument vector it was asked to run
/// - answers by subcommand (first argument) with a [`FakeResponse`]
/// - answers log watches by searching a fixed log text
///
/// Subcommands without a configured response succeed with empty output.
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    responses: HashMap<String, FakeResponse>,
    logs: String,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, subcommand: &str, response: FakeResponse) -> Self {
        self.responses.insert(subcommand.to_string(), response);
        self
    }

    pub fn with_logs(mut self, logs: &str) -> Self {
        self.logs = logs.to_string();
        self
    }

    /// Argument vectors seen so far, in call order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Subcommands seen so far, in call order.
    pub fn subcommands(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|args| args.first().cloned())
            .collect()
    }

    fn record(&self, spec: &CommandSpec) {
        self.calls.lock().unwrap().push(spec.args.clone());
    }
}

impl CommandRunner for FakeRunner {
    fn run<'a>(&'a self, spec: &'a CommandSpec) -> BoxFuture<'a, Result<ExecutionResult>> {
        self.record(spec);
        let response = spec
            .args
            .first()
            .and_then(|sub| self.responses.get(sub))
            .cloned()
            .unwrap_or_default();

        Box::pin(async move {
            if response.exit_code != 0 {
                return Err(DockwrapError::CommandFailed {
                    program: spec.program.clone(),
                    args: spec.args.clone(),
                    code: response.exit_code,
                    stderr: response.stderr,
                });
            }
            Ok(ExecutionResult {
                exit_code: 0,
                stdout: response.stdout,
                stderr: response.stderr,
                duration: Duration::ZERO,
            })
        })
    }

    fn watch<'a>(
        &'a self,
        spec: &'a CommandSpec,
        marker: &'a str,
        options: &'a WatchOptions,
        cancel: &'a CancelToken,
    ) -> BoxFuture<'a, Result<LogMatch>> {
        self.record(spec);
        Box::pin(async move {
            if cancel.is_cancelled() {
                return Err(DockwrapError::Cancelled {
                    marker: marker.to_string(),
                });
            }
            let mut output = String::new();
            for line in self.logs.lines() {
                output.push_str(line);
                output.push('\n');
                if line.contains(marker) {
                    return Ok(LogMatch {
                        line: line.to_string(),
                        elapsed: Duration::ZERO,
                        output,
                    });
                }
            }
            Err(DockwrapError::Timeout {
                marker: marker.to_string(),
                elapsed: options.timeout,
            })
        })
    }
}
