// src/exec/runner.rs

//! Individual service process runner.

use std::process::Stdio;
use std::sync::Arc;

use tokio::io::AsyncRead;
use tokio::process::Command;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::errors::{DevserveError, Result};
use crate::exec::line_reader::forward_lines;
use crate::sink::LineSink;
use crate::supervise::ServiceOutcome;
use crate::types::CommandLine;

/// Run one service process to completion, streaming its output.
///
/// - Spawns the child with stdin disconnected and both output streams piped.
/// - Starts one reader task per stream; lines within a stream arrive at the
///   sink in order, there is no ordering between the two streams.
/// - Returns only once the child has exited **and** both readers have reached
///   end-of-stream, so output buffered across the exit is not lost.
/// - A non-zero exit is reported as `ServiceOutcome::Failed`, not as an
///   error; the caller decides whether that matters.
/// - When the shutdown signal fires while waiting, the child is killed
///   unconditionally (kill, not a cooperative stop), the readers are drained,
///   and `DevserveError::Cancelled` unwinds to the caller.
pub async fn run_process(
    name: &str,
    cmd: &CommandLine,
    on_stdout: Arc<dyn LineSink>,
    on_stderr: Arc<dyn LineSink>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<ServiceOutcome> {
    info!(service = %name, cmd = %cmd, "starting service process");

    let mut command = Command::new(cmd.program());
    command
        .args(cmd.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = command.spawn().map_err(|source| DevserveError::Spawn {
        program: cmd.program().to_string(),
        source,
    })?;

    let stdout_reader = spawn_stream_reader(name, "stdout", child.stdout.take(), on_stdout);
    let stderr_reader = spawn_stream_reader(name, "stderr", child.stderr.take(), on_stderr);

    let result = tokio::select! {
        status = child.wait() => match status {
            Ok(status) => {
                let code = status.code().unwrap_or(-1);

                info!(
                    service = %name,
                    exit_code = code,
                    success = status.success(),
                    "service process exited"
                );

                if status.success() {
                    Ok(ServiceOutcome::Success)
                } else {
                    Ok(ServiceOutcome::Failed(code))
                }
            }
            Err(err) => Err(DevserveError::Io(err)),
        },

        _ = wait_for_shutdown(&mut shutdown) => {
            info!(service = %name, "shutdown requested; killing service process");
            // tokio's kill() sends SIGKILL (or the platform equivalent) and
            // reaps the child before returning.
            if let Err(err) = child.kill().await {
                warn!(
                    service = %name,
                    error = %err,
                    "failed to kill service process on shutdown"
                );
            }
            Err(DevserveError::Cancelled)
        }
    };

    // Drain both streams to the end even when the child was killed; output
    // buffered in the pipes just before exit still has to reach the sinks.
    join_stream_reader(name, "stdout", stdout_reader).await;
    join_stream_reader(name, "stderr", stderr_reader).await;

    result
}

/// Wait until the shutdown flag flips to `true`.
///
/// A closed channel means no shutdown can ever arrive; park this branch so
/// the child's own exit wins the select instead of a spurious cancellation.
async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn spawn_stream_reader<R>(
    name: &str,
    stream: &'static str,
    pipe: Option<R>,
    sink: Arc<dyn LineSink>,
) -> Option<JoinHandle<std::io::Result<()>>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let Some(pipe) = pipe else {
        warn!(service = %name, stream, "no pipe available for stream; nothing to read");
        return None;
    };

    let service = name.to_string();
    Some(tokio::spawn(async move {
        let result = forward_lines(pipe, sink.as_ref()).await;
        debug!(service = %service, stream, "stream reader finished");
        result
    }))
}

/// Join one reader task.
///
/// A read error on one stream is absorbed here with a warning; the sibling
/// stream and the wait on the child are unaffected.
async fn join_stream_reader(
    name: &str,
    stream: &'static str,
    handle: Option<JoinHandle<std::io::Result<()>>>,
) {
    let Some(handle) = handle else { return };

    match handle.await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            warn!(service = %name, stream, error = %err, "stream read error");
        }
        Err(err) => {
            warn!(service = %name, stream, error = %err, "stream reader task failed");
        }
    }
}
