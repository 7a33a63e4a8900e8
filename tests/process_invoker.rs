// tests/process_invoker.rs
#![cfg(unix)]

mod common;
use crate::common::{init_tracing, sh};

use std::error::Error;

use dockwrap::errors::DockwrapError;
use dockwrap::exec::{CommandSpec, ProcessInvoker};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn zero_exit_returns_all_of_stdout() -> TestResult {
    init_tracing();

    let invoker = ProcessInvoker::new();
    // Larger than a pipe buffer: must be drained while waiting.
    let result = invoker
        .execute(&sh("i=0; while [ $i -lt 20000 ]; do echo line-$i; i=$((i+1)); done"))
        .await?;

    assert_eq!(result.exit_code, 0);
    let lines: Vec<&str> = result.stdout_lines().collect();
    assert_eq!(lines.len(), 20000);
    assert_eq!(lines[0], "line-0");
    assert_eq!(lines[19999], "line-19999");
    Ok(())
}

#[tokio::test]
async fn stderr_of_successful_command_is_kept() -> TestResult {
    init_tracing();

    let result = ProcessInvoker::new()
        .execute(&sh("echo out; echo warn >&2"))
        .await?;
    assert_eq!(result.stdout, "out\n");
    assert_eq!(result.stderr, "warn\n");
    Ok(())
}

#[tokio::test]
async fn non_zero_exit_carries_code_and_stderr() {
    init_tracing();

    let result = ProcessInvoker::new()
        .execute(&sh("echo partial; echo 'No such container: web' >&2; exit 3"))
        .await;

    match result {
        Err(DockwrapError::CommandFailed { program, code, stderr, .. }) => {
            assert_eq!(program, "sh");
            assert_eq!(code, 3);
            assert_eq!(stderr, "No such container: web\n");
        }
        other => panic!("expected CommandFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn failure_without_stderr_is_still_a_failure() {
    init_tracing();

    let result = ProcessInvoker::new().execute(&sh("exit 1")).await;
    assert!(matches!(
        result,
        Err(DockwrapError::CommandFailed { code: 1, .. })
    ));
}

#[tokio::test]
async fn missing_executable_is_spawn_failed() {
    init_tracing();

    let spec = CommandSpec::new("dockwrap-no-such-binary-4b1d").arg("ps");
    match ProcessInvoker::new().execute(&spec).await {
        Err(DockwrapError::SpawnFailed { program, .. }) => {
            assert_eq!(program, "dockwrap-no-such-binary-4b1d");
        }
        other => panic!("expected SpawnFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_arguments_are_passed_verbatim() -> TestResult {
    init_tracing();

    // $# counts positional args after $0; both empty strings must survive.
    let spec = CommandSpec::new("sh")
        .args(["-c", "echo $#", "zero", "", ""]);
    let result = ProcessInvoker::new().execute(&spec).await?;
    assert_eq!(result.stdout.trim(), "2");
    assert!(!spec.args.contains(&spec.program));
    Ok(())
}

#[tokio::test]
async fn stdout_is_captured_not_inherited() -> TestResult {
    init_tracing();

    let result = ProcessInvoker::new().execute(&sh("printf abc")).await?;
    assert_eq!(result.stdout, "abc");
    Ok(())
}
