// tests/config_loading.rs

use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;

use dockwrap::config::{load_and_validate, load_or_default, ConfigFile, DEFAULT_EXECUTABLE};
use dockwrap::errors::DockwrapError;
use dockwrap::types::{parse_duration, OnProcessExit};

#[test]
fn full_config_is_parsed() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[client]
executable = "/opt/podman/bin/podman"

[log_watch]
timeout = "1500ms"
break_on_error = false
on_exit = "fail"
"#
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.executable, "/opt/podman/bin/podman");
    assert_eq!(cfg.log_watch.timeout, Duration::from_millis(1500));
    assert!(!cfg.log_watch.break_on_error);
    assert_eq!(cfg.log_watch.on_exit, OnProcessExit::Fail);
}

#[test]
fn empty_config_uses_defaults() {
    let file = NamedTempFile::new().unwrap();

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.executable, DEFAULT_EXECUTABLE);
    assert_eq!(cfg.log_watch.timeout, Duration::from_secs(30));
    assert!(cfg.log_watch.break_on_error);
    assert_eq!(cfg.log_watch.on_exit, OnProcessExit::Wait);

    let defaults = ConfigFile::default();
    assert_eq!(defaults.executable, cfg.executable);
    assert_eq!(defaults.log_watch, cfg.log_watch);
}

#[test]
fn invalid_timeout_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[log_watch]\ntimeout = \"soon\"\n").unwrap();

    match load_and_validate(file.path()) {
        Err(DockwrapError::ConfigError(msg)) => assert!(msg.contains("timeout")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn zero_timeout_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[log_watch]\ntimeout = \"0s\"\n").unwrap();

    let result = load_and_validate(file.path());
    assert!(matches!(result, Err(DockwrapError::ConfigError(_))));
}

#[test]
fn blank_executable_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[client]\nexecutable = \"  \"\n").unwrap();

    match load_and_validate(file.path()) {
        Err(DockwrapError::ConfigError(msg)) => assert!(msg.contains("executable")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn unknown_on_exit_value_is_a_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[log_watch]\non_exit = \"sometimes\"\n").unwrap();

    let result = load_and_validate(file.path());
    assert!(matches!(result, Err(DockwrapError::TomlError(_))));
}

#[test]
fn explicit_missing_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let result = load_or_default(Some(missing.as_path()));
    assert!(matches!(result, Err(DockwrapError::IoError(_))));
}

#[test]
fn duration_strings() {
    assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
    assert_eq!(parse_duration(" 3s "), Ok(Duration::from_secs(3)));
    assert_eq!(parse_duration("2m"), Ok(Duration::from_secs(120)));
    assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
    assert!(parse_duration("10").is_err());
    assert!(parse_duration("5d").is_err());
    assert!(parse_duration("").is_err());

    // Overflowing unit conversions are rejected instead of wrapping.
    let err = parse_duration("6000000000000000h").unwrap_err();
    assert!(err.contains("too large"), "unexpected error: {err}");
    assert!(parse_duration("400000000000000000m").is_err());
    assert_eq!(
        parse_duration("18446744073709551615s"),
        Ok(Duration::from_secs(u64::MAX))
    );
}

#[test]
fn on_exit_from_str() {
    assert_eq!("Wait".parse::<OnProcessExit>(), Ok(OnProcessExit::Wait));
    assert_eq!("fail".parse::<OnProcessExit>(), Ok(OnProcessExit::Fail));
    assert!("later".parse::<OnProcessExit>().is_err());
}

#[test]
fn executable_override_is_validated() {
    let mut cfg = ConfigFile::default();

    cfg.override_executable(" podman ").unwrap();
    assert_eq!(cfg.executable, "podman");

    match cfg.override_executable("") {
        Err(DockwrapError::ConfigError(msg)) => assert!(msg.contains("executable")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
    assert_eq!(cfg.executable, "podman");
}
