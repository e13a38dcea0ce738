// tests/runner_process.rs

//! Integration tests driving real child processes through the runner.

#![cfg(unix)]

use std::error::Error;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::timeout;

use devserve::errors::DevserveError;
use devserve::exec::run_process;
use devserve::supervise::ServiceOutcome;
use devserve::types::CommandLine;
use devserve_test_utils::builders::collecting_sink;
use devserve_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn sh(script: &str) -> CommandLine {
    CommandLine::from_argv(vec![
        "sh".to_string(),
        "-c".to_string(),
        script.to_string(),
    ])
    .expect("sh command is valid")
}

#[tokio::test]
async fn immediate_exit_with_no_output_is_success_with_silent_sinks() -> TestResult {
    init_tracing();

    let (out_sink, out_lines) = collecting_sink();
    let (err_sink, err_lines) = collecting_sink();
    let (_tx, rx) = watch::channel(false);

    let outcome =
        with_timeout(run_process("fast", &sh("exit 0"), out_sink, err_sink, rx)).await?;

    assert_eq!(outcome, ServiceOutcome::Success);
    assert!(out_lines.lock().unwrap().is_empty());
    assert!(err_lines.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn nonzero_exit_is_an_outcome_not_an_error() -> TestResult {
    init_tracing();

    let (out_sink, _) = collecting_sink();
    let (err_sink, _) = collecting_sink();
    let (_tx, rx) = watch::channel(false);

    let outcome =
        with_timeout(run_process("flaky", &sh("exit 3"), out_sink, err_sink, rx)).await?;

    assert_eq!(outcome, ServiceOutcome::Failed(3));
    Ok(())
}

#[tokio::test]
async fn spawn_failure_is_reported_immediately() -> TestResult {
    init_tracing();

    let cmd = CommandLine::from_argv(vec!["devserve-no-such-binary-xyz".to_string()])
        .expect("argv is non-empty");
    let (out_sink, _) = collecting_sink();
    let (err_sink, _) = collecting_sink();
    let (_tx, rx) = watch::channel(false);

    let err = with_timeout(run_process("ghost", &cmd, out_sink, err_sink, rx))
        .await
        .expect_err("spawning a missing binary must fail");

    assert!(matches!(err, DevserveError::Spawn { .. }));
    Ok(())
}

#[tokio::test]
async fn interleaved_output_reaches_the_right_sink_in_stream_order() -> TestResult {
    init_tracing();

    let script = "echo out1; echo err1 >&2; sleep 0.1; echo out2; echo err2 >&2";
    let (out_sink, out_lines) = collecting_sink();
    let (err_sink, err_lines) = collecting_sink();
    let (_tx, rx) = watch::channel(false);

    let outcome =
        with_timeout(run_process("chatty", &sh(script), out_sink, err_sink, rx)).await?;

    assert_eq!(outcome, ServiceOutcome::Success);
    assert_eq!(
        *out_lines.lock().unwrap(),
        vec!["out1".to_string(), "out2".to_string()]
    );
    assert_eq!(
        *err_lines.lock().unwrap(),
        vec!["err1".to_string(), "err2".to_string()]
    );
    Ok(())
}

#[tokio::test]
async fn blank_lines_are_filtered_before_the_sinks() -> TestResult {
    init_tracing();

    let (out_sink, out_lines) = collecting_sink();
    let (err_sink, _) = collecting_sink();
    let (_tx, rx) = watch::channel(false);

    let outcome = with_timeout(run_process(
        "spacey",
        &sh("printf 'a\\n\\n  \\nb\\n'"),
        out_sink,
        err_sink,
        rx,
    ))
    .await?;

    assert_eq!(outcome, ServiceOutcome::Success);
    assert_eq!(
        *out_lines.lock().unwrap(),
        vec!["a".to_string(), "b".to_string()]
    );
    Ok(())
}

#[tokio::test]
async fn cancellation_kills_a_long_running_child_within_bounded_time() -> TestResult {
    init_tracing();

    let (out_sink, _) = collecting_sink();
    let (err_sink, _) = collecting_sink();
    let (tx, rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        run_process("sleeper", &sh("sleep 30"), out_sink, err_sink, rx).await
    });

    // Give the child time to actually start before interrupting.
    tokio::time::sleep(Duration::from_millis(200)).await;
    tx.send(true).expect("runner is still listening");

    let result = timeout(Duration::from_secs(5), task).await??;
    assert!(matches!(result, Err(DevserveError::Cancelled)));
    Ok(())
}
