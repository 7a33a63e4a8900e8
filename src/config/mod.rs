// src/config/mod.rs

//! Configuration loading and validation for dockwrap.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate durations and the executable name (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{
    ClientSection, ConfigFile, LogWatchSection, RawConfigFile, DEFAULT_EXECUTABLE,
};
pub use validate::validate_config;
