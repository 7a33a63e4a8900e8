// tests/log_watch.rs
#![cfg(unix)]

mod common;
use crate::common::{init_tracing, sh, with_timeout};

use std::error::Error;
use std::time::{Duration, Instant};

use dockwrap::errors::DockwrapError;
use dockwrap::exec::{watch_for_output, CancelToken, CommandSpec, WatchOptions};
use dockwrap::types::OnProcessExit;

type TestResult = Result<(), Box<dyn Error>>;

fn options(timeout_ms: u64) -> WatchOptions {
    WatchOptions {
        timeout: Duration::from_millis(timeout_ms),
        ..WatchOptions::default()
    }
}

fn pid_is_alive(pid: &str) -> bool {
    std::process::Command::new("kill")
        .args(["-0", pid])
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[tokio::test]
async fn marker_is_reported_when_it_appears_and_process_is_killed() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let pid_file = dir.path().join("pid");
    let script = format!(
        "echo $$ > {}; echo booting; sleep 0.3; echo 'server is ready on :8080'; exec sleep 30",
        pid_file.display()
    );

    let started = Instant::now();
    let found = with_timeout(watch_for_output(
        &sh(&script),
        "ready",
        &options(5_000),
        &CancelToken::new(),
    ))
    .await?;

    assert_eq!(found.line, "server is ready on :8080");
    assert!(found.output.contains("booting\n"));
    assert!(found.elapsed >= Duration::from_millis(250));
    assert!(started.elapsed() < Duration::from_secs(3));

    let pid = std::fs::read_to_string(&pid_file)?;
    assert!(!pid_is_alive(pid.trim()), "watched process must be gone");
    Ok(())
}

#[tokio::test]
async fn silent_process_times_out_at_the_deadline_not_before() {
    init_tracing();

    let started = Instant::now();
    let result = with_timeout(watch_for_output(
        &sh("exec sleep 30"),
        "ready",
        &options(400),
        &CancelToken::new(),
    ))
    .await;

    let waited = started.elapsed();
    match result {
        Err(DockwrapError::Timeout { marker, elapsed }) => {
            assert_eq!(marker, "ready");
            assert!(elapsed >= Duration::from_millis(400));
        }
        other => panic!("expected Timeout, got {:?}", other),
    }
    assert!(waited >= Duration::from_millis(400));
    assert!(waited < Duration::from_secs(3));
}

#[tokio::test]
async fn output_without_marker_times_out() {
    init_tracing();

    let result = with_timeout(watch_for_output(
        &sh("while true; do echo still-booting; sleep 0.05; done"),
        "ready",
        &options(300),
        &CancelToken::new(),
    ))
    .await;

    assert!(matches!(result, Err(DockwrapError::Timeout { .. })));
}

#[tokio::test]
async fn stderr_output_is_fatal_by_default() {
    init_tracing();

    let started = Instant::now();
    let result = with_timeout(watch_for_output(
        &sh("sleep 0.1; echo 'boom: config missing' >&2; sleep 1; echo ready; exec sleep 30"),
        "ready",
        &options(4_000),
        &CancelToken::new(),
    ))
    .await;

    match result {
        Err(DockwrapError::UpstreamFatal { stderr, .. }) => {
            assert!(stderr.contains("boom: config missing"));
        }
        other => panic!("expected UpstreamFatal, got {:?}", other),
    }
    assert!(started.elapsed() < Duration::from_millis(900));
}

#[tokio::test]
async fn stderr_wins_over_a_marker_printed_right_after_it() {
    init_tracing();

    // The two pipes are read concurrently, so the marker follows the error
    // by a few milliseconds only.
    let result = with_timeout(watch_for_output(
        &sh("echo 'fatal: bind failed' >&2; sleep 0.05; echo ready; exec sleep 30"),
        "ready",
        &options(4_000),
        &CancelToken::new(),
    ))
    .await;

    match result {
        Err(DockwrapError::UpstreamFatal { stderr, .. }) => {
            assert!(stderr.contains("fatal: bind failed"));
        }
        other => panic!("expected UpstreamFatal, got {:?}", other),
    }
}

#[tokio::test]
async fn invalid_utf8_line_does_not_stop_the_search() -> TestResult {
    init_tracing();

    let found = with_timeout(watch_for_output(
        &sh("printf 'bin \\377\\376 blob\\n'; sleep 0.1; echo ready; exec sleep 30"),
        "ready",
        &options(3_000),
        &CancelToken::new(),
    ))
    .await?;

    assert_eq!(found.line, "ready");
    assert!(found.output.starts_with("bin \u{FFFD}\u{FFFD} blob\n"));
    Ok(())
}

#[tokio::test]
async fn binary_output_without_newlines_is_still_searched() -> TestResult {
    init_tracing();

    let found = with_timeout(watch_for_output(
        &sh("printf '\\000\\001\\377'; echo ' ready'; exec sleep 30"),
        "ready",
        &options(3_000),
        &CancelToken::new(),
    ))
    .await?;

    assert!(found.line.ends_with(" ready"));
    Ok(())
}

#[tokio::test]
async fn stderr_is_tolerated_when_break_on_error_is_off() -> TestResult {
    init_tracing();

    let opts = WatchOptions {
        break_on_error: false,
        ..options(4_000)
    };
    let found = with_timeout(watch_for_output(
        &sh("echo 'warning: slow disk' >&2; sleep 0.1; echo ready; exec sleep 30"),
        "ready",
        &opts,
        &CancelToken::new(),
    ))
    .await?;

    assert_eq!(found.line, "ready");
    Ok(())
}

#[tokio::test]
async fn natural_exit_waits_for_deadline_by_default() {
    init_tracing();

    let started = Instant::now();
    let result = with_timeout(watch_for_output(
        &sh("echo done-without-marker"),
        "ready",
        &options(500),
        &CancelToken::new(),
    ))
    .await;

    assert!(matches!(result, Err(DockwrapError::Timeout { .. })));
    assert!(started.elapsed() >= Duration::from_millis(500));
}

#[tokio::test]
async fn natural_exit_fails_fast_when_configured() {
    init_tracing();

    let opts = WatchOptions {
        on_exit: OnProcessExit::Fail,
        ..options(5_000)
    };
    let started = Instant::now();
    let result = with_timeout(watch_for_output(
        &sh("echo nope; exit 2"),
        "ready",
        &opts,
        &CancelToken::new(),
    ))
    .await;

    match result {
        Err(DockwrapError::ProcessExited { code, .. }) => assert_eq!(code, Some(2)),
        other => panic!("expected ProcessExited, got {:?}", other),
    }
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn marker_in_unterminated_last_line_is_found() -> TestResult {
    init_tracing();

    let opts = WatchOptions {
        on_exit: OnProcessExit::Fail,
        ..options(5_000)
    };
    let found = with_timeout(watch_for_output(
        &sh("printf 'almost\\nnow ready'"),
        "ready",
        &opts,
        &CancelToken::new(),
    ))
    .await?;

    assert_eq!(found.line, "now ready");
    Ok(())
}

#[tokio::test]
async fn cancellation_stops_the_watch_early() {
    init_tracing();

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            cancel.cancel();
        });
    }

    let started = Instant::now();
    let result = with_timeout(watch_for_output(
        &sh("exec sleep 30"),
        "ready",
        &options(10_000),
        &cancel,
    ))
    .await;

    assert!(matches!(result, Err(DockwrapError::Cancelled { .. })));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn missing_executable_is_spawn_failed() {
    init_tracing();

    let spec = CommandSpec::new("dockwrap-no-such-binary-4b1d").args(["logs", "-f", "web"]);
    let result = watch_for_output(&spec, "ready", &options(1_000), &CancelToken::new()).await;
    assert!(matches!(result, Err(DockwrapError::SpawnFailed { .. })));
}

#[test]
fn cancel_token_starts_uncancelled() {
    let token = CancelToken::new();
    assert!(!token.is_cancelled());
}

#[test]
fn cancel_token_is_idempotent_and_shared_across_clones() {
    let a = CancelToken::new();
    let b = a.clone();
    a.cancel();
    a.cancel();
    assert!(a.is_cancelled());
    assert!(b.is_cancelled());
}

#[tokio::test]
async fn cancelled_future_resolves_after_cancel() {
    let token = CancelToken::new();
    let waiter = {
        let token = token.clone();
        tokio::spawn(async move { token.cancelled().await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    token.cancel();
    with_timeout(waiter).await.expect("waiter task panicked");
}
