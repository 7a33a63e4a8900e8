// src/logging.rs

//! Global `tracing` subscriber for the `dockwrap` binary.
//!
//! `--log-level` wins when given. Otherwise `DOCKWRAP_LOG` is read as an
//! `EnvFilter` directive string, so both `debug` and
//! `dockwrap::exec=trace,info` work. Without either, `info`.
//!
//! Output goes to stderr; stdout is reserved for results such as container
//! ids and `ps` tables.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "DOCKWRAP_LOG";

/// Install the subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    fmt()
        .with_env_filter(resolve_filter(cli_level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

/// The filter `init_logging` would install for `cli_level` and the current
/// environment.
pub fn resolve_filter(cli_level: Option<LogLevel>) -> EnvFilter {
    match cli_level {
        Some(lvl) => EnvFilter::new(directive(lvl)),
        None => EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info")),
    }
}

fn directive(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
