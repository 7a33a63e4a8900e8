// src/config/model.rs

use serde::Deserialize;

use crate::exec::WatchOptions;
use crate::types::OnProcessExit;

/// Default executable, resolved through `PATH`.
pub const DEFAULT_EXECUTABLE: &str = "docker";

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [client]
/// executable = "docker"
///
/// [log_watch]
/// timeout = "30s"
/// break_on_error = true
/// on_exit = "wait"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub client: ClientSection,

    #[serde(default)]
    pub log_watch: LogWatchSection,
}

/// `[client]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSection {
    /// Path or bare name of the container tool.
    #[serde(default = "default_executable")]
    pub executable: String,
}

fn default_executable() -> String {
    DEFAULT_EXECUTABLE.to_string()
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            executable: default_executable(),
        }
    }
}

/// `[log_watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LogWatchSection {
    /// Duration string (e.g. `"30s"`, `"500ms"`).
    #[serde(default = "default_timeout")]
    pub timeout: String,

    /// Treat any stderr output as fatal while waiting.
    #[serde(default = "default_break_on_error")]
    pub break_on_error: bool,

    /// `"wait"` or `"fail"`.
    #[serde(default)]
    pub on_exit: OnProcessExit,
}

fn default_timeout() -> String {
    "30s".to_string()
}

fn default_break_on_error() -> bool {
    true
}

impl Default for LogWatchSection {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            break_on_error: default_break_on_error(),
            on_exit: OnProcessExit::default(),
        }
    }
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (or `Default`), so the
/// executable is non-empty and the watch timeout is a real, non-zero duration.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub executable: String,
    pub log_watch: WatchOptions,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(executable: String, log_watch: WatchOptions) -> Self {
        Self {
            executable,
            log_watch,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(default_executable(), WatchOptions::default())
    }
}
