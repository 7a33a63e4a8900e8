// src/errors.rs

//! Crate-wide error type and result alias.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DockwrapError {
    /// The executable could not be started (not found, not runnable).
    #[error("failed to spawn '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran to completion with a non-zero exit code.
    #[error("command failed: '{program} {}' exited with {code}: {stderr}", .args.join(" "))]
    CommandFailed {
        program: String,
        args: Vec<String>,
        code: i32,
        stderr: String,
    },

    /// The table header did not contain every expected column label.
    #[error("returned headers did not match expected headers (missing '{missing}'): {header}")]
    HeaderMismatch { missing: String, header: String },

    #[error("row too short for column '{column}' at offset {offset} (row length {len}): {row}")]
    RowTooShort {
        column: String,
        offset: usize,
        len: usize,
        row: String,
    },

    /// No match was observed before the deadline.
    #[error("timed out after {elapsed:?} waiting for '{marker}'")]
    Timeout { marker: String, elapsed: Duration },

    /// Output arrived on stderr while error output was treated as fatal.
    #[error("error output while waiting for '{marker}': {stderr}")]
    UpstreamFatal { marker: String, stderr: String },

    /// The process exited on its own before the marker appeared.
    #[error("process exited with {code:?} before '{marker}' appeared")]
    ProcessExited { marker: String, code: Option<i32> },

    #[error("cancelled while waiting for '{marker}'")]
    Cancelled { marker: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, DockwrapError>;
