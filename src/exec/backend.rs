// src/exec/backend.rs

//! Pluggable runner abstraction.
//!
//! [`DockerClient`](crate::docker::DockerClient) talks to a `CommandRunner`
//! instead of spawning processes directly. Production code uses
//! [`ProcessInvoker`]; tests can provide a runner that records the argument
//! vectors it was given and answers with canned output.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::exec::CancelToken;
use crate::exec::command::{CommandSpec, ExecutionResult};
use crate::exec::invoker::ProcessInvoker;
use crate::exec::log_watch::{watch_for_output, LogMatch, WatchOptions};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait abstracting how commands are executed.
pub trait CommandRunner: Send + Sync {
    /// Run to completion; non-zero exit is an error.
    fn run<'a>(&'a self, spec: &'a CommandSpec) -> BoxFuture<'a, Result<ExecutionResult>>;

    /// Run until `marker` shows up on stdout (see [`watch_for_output`]).
    fn watch<'a>(
        &'a self,
        spec: &'a CommandSpec,
        marker: &'a str,
        options: &'a WatchOptions,
        cancel: &'a CancelToken,
    ) -> BoxFuture<'a, Result<LogMatch>>;
}

impl CommandRunner for ProcessInvoker {
    fn run<'a>(&'a self, spec: &'a CommandSpec) -> BoxFuture<'a, Result<ExecutionResult>> {
        Box::pin(self.execute(spec))
    }

    fn watch<'a>(
        &'a self,
        spec: &'a CommandSpec,
        marker: &'a str,
        options: &'a WatchOptions,
        cancel: &'a CancelToken,
    ) -> BoxFuture<'a, Result<LogMatch>> {
        Box::pin(watch_for_output(spec, marker, options, cancel))
    }
}
