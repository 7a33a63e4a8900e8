// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use crate::types::parse_duration;

/// Command-line arguments for `dockwrap`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dockwrap",
    version,
    about = "Drive the docker CLI and get structured results back.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Dockwrap.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Container tool to invoke; overrides `[client].executable`.
    #[arg(long, value_name = "PATH", global = true)]
    pub docker: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DOCKWRAP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List containers.
    Ps {
        /// Include stopped containers.
        #[arg(short, long)]
        all: bool,

        /// Only containers whose name contains NAME (repeatable).
        #[arg(long = "name", value_name = "NAME")]
        names: Vec<String>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Build an image and print its id.
    Build {
        #[arg(default_value = ".")]
        path: String,
    },

    /// Pull an image.
    Pull {
        image: String,

        #[arg(long)]
        tag: Option<String>,
    },

    /// Start a new detached container and print its id.
    Run {
        image: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        hostname: Option<String>,

        /// Keep stdin open.
        #[arg(short, long)]
        interactive: bool,

        /// Environment variable (repeatable).
        #[arg(short = 'e', long = "env", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        env: Vec<(String, String)>,

        /// Volume mount (repeatable).
        #[arg(short = 'v', long = "volume", value_name = "VOLUME")]
        volumes: Vec<String>,

        /// Stop and remove an existing container with the same name first.
        #[arg(long, requires = "name")]
        replace: bool,
    },

    /// Start an existing container.
    Start { name: String },

    /// Stop a running container.
    Stop { name: String },

    /// Remove a container.
    Rm {
        name: String,

        /// Stop the container before removing it.
        #[arg(long)]
        force_stop: bool,
    },

    /// Follow a container's logs until a line contains MARKER.
    WaitLog {
        name: String,

        marker: String,

        /// Deadline such as `30s` or `500ms`; overrides `[log_watch].timeout`.
        #[arg(long, value_parser = parse_duration)]
        timeout: Option<Duration>,

        /// Do not abort when the container writes to stderr.
        #[arg(long)]
        allow_stderr: bool,

        /// Fail as soon as the log stream ends instead of waiting for the deadline.
        #[arg(long)]
        fail_on_exit: bool,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
