// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DockwrapError, Result};
use crate::exec::WatchOptions;
use crate::types::parse_duration;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = DockwrapError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let executable = validate_executable(&raw)?;
        let log_watch = validate_log_watch(&raw)?;
        Ok(ConfigFile::new_unchecked(executable, log_watch))
    }
}

/// Validate a raw config without consuming it.
pub fn validate_config(raw: &RawConfigFile) -> Result<()> {
    validate_executable(raw)?;
    validate_log_watch(raw)?;
    Ok(())
}

impl ConfigFile {
    /// Replace the executable (e.g. from `--docker`), with the same checks
    /// a config file gets.
    pub fn override_executable(&mut self, exe: &str) -> Result<()> {
        self.executable = check_executable(exe)?;
        Ok(())
    }
}

fn validate_executable(cfg: &RawConfigFile) -> Result<String> {
    check_executable(&cfg.client.executable)
}

fn check_executable(exe: &str) -> Result<String> {
    let exe = exe.trim();
    if exe.is_empty() {
        return Err(DockwrapError::ConfigError(
            "[client].executable must not be empty".to_string(),
        ));
    }
    Ok(exe.to_string())
}

fn validate_log_watch(cfg: &RawConfigFile) -> Result<WatchOptions> {
    let section = &cfg.log_watch;

    let timeout = parse_duration(&section.timeout).map_err(|e| {
        DockwrapError::ConfigError(format!("[log_watch].timeout: {e}"))
    })?;

    if timeout.is_zero() {
        return Err(DockwrapError::ConfigError(
            "[log_watch].timeout must be greater than zero".to_string(),
        ));
    }

    Ok(WatchOptions {
        timeout,
        break_on_error: section.break_on_error,
        on_exit: section.on_exit,
    })
}
