// src/exec/backend.rs

//! Pluggable service-runner abstraction.
//!
//! The supervisor talks to a `ServiceRunner` instead of spawning processes
//! directly. This makes it easy to swap in a fake runner in tests while
//! keeping the production launch sequence in [`runner`] and [`preflight`].
//!
//! - `RealServiceRunner` is the default implementation: preflight cleanup
//!   (when configured) followed by the real process run.
//! - Tests can provide their own `ServiceRunner` that, for example, records
//!   which services were launched and completes on a script.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::watch;

use crate::errors::Result;
use crate::exec::preflight::kill_stale;
use crate::exec::runner::run_process;
use crate::supervise::{ServiceOutcome, ServiceSpec};

/// Trait abstracting how one service launch task is executed.
///
/// The returned future is the whole task: it resolves when the service has
/// finished (exited, failed, or been cancelled). Implementations must return
/// a `'static` future so the supervisor can move it onto its join set.
pub trait ServiceRunner: Send + Sync {
    fn run_service(
        &self,
        spec: ServiceSpec,
        shutdown: watch::Receiver<bool>,
    ) -> Pin<Box<dyn Future<Output = Result<ServiceOutcome>> + Send>>;
}

/// Real runner used in production: stale-instance cleanup, then spawn and
/// supervise the process.
pub struct RealServiceRunner;

impl ServiceRunner for RealServiceRunner {
    fn run_service(
        &self,
        spec: ServiceSpec,
        shutdown: watch::Receiver<bool>,
    ) -> Pin<Box<dyn Future<Output = Result<ServiceOutcome>> + Send>> {
        Box::pin(async move {
            let ServiceSpec {
                name,
                cmd,
                kill_stale: stale_name,
                stdout_sink,
                stderr_sink,
            } = spec;

            // Outcome deliberately ignored: the cleanup is advisory.
            if let Some(ref exe_name) = stale_name {
                kill_stale(exe_name).await;
            }

            run_process(&name, &cmd, stdout_sink, stderr_sink, shutdown).await
        })
    }
}
