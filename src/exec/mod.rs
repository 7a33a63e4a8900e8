// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the container tool, using
//! `tokio::process::Command`, and turning exits into typed results.
//!
//! - [`command`] holds `CommandSpec` (what to run) and `ExecutionResult`.
//! - [`invoker`] runs a command to completion and classifies its exit code.
//! - [`log_watch`] tails stdout for a marker under a deadline.
//! - [`backend`] provides the `CommandRunner` trait and its implementation
//!   for `ProcessInvoker`, which tests can replace with a fake.

pub mod backend;
pub mod command;
pub mod invoker;
pub mod log_watch;

pub use backend::{BoxFuture, CommandRunner};
pub use command::{CommandSpec, ExecutionResult};
pub use invoker::ProcessInvoker;
pub use log_watch::{watch_for_output, LogMatch, WatchOptions};

/// Cancellation handle accepted by log watches. Clones share state.
pub use tokio_util::sync::CancellationToken as CancelToken;
