// src/supervise/supervisor.rs

//! Top-level supervisor: one concurrent launch task per service, joined as a
//! group.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::errors::{DevserveError, Result};
use crate::exec::ServiceRunner;
use crate::supervise::{ServiceName, ServiceOutcome, ServiceSpec};

/// Owns the fixed set of service launch tasks and runs them to completion.
pub struct Supervisor<R: ServiceRunner + 'static> {
    runner: Arc<R>,
    services: Vec<ServiceSpec>,
}

impl<R: ServiceRunner + 'static> Supervisor<R> {
    pub fn new(runner: R, services: Vec<ServiceSpec>) -> Self {
        Self {
            runner: Arc::new(runner),
            services,
        }
    }

    /// Run every service concurrently and return once **all** of them have
    /// finished.
    ///
    /// - Each task is `runner.run_service(spec)`: preflight cleanup followed
    ///   by the supervised process run.
    /// - A service that exits (cleanly or not) ends its own task only;
    ///   siblings keep running.
    /// - When the shutdown signal fires, every in-flight runner kills its
    ///   child and unwinds with `Cancelled`; `run_all` still waits for all of
    ///   them before returning `Err(Cancelled)` so the interruption reaches
    ///   the caller after the children are confirmed dead.
    pub async fn run_all(self, shutdown: watch::Receiver<bool>) -> Result<()> {
        let names: Vec<&str> = self.services.iter().map(|s| s.name.as_str()).collect();
        info!(services = ?names, "supervisor starting");

        let mut tasks: JoinSet<(ServiceName, Result<ServiceOutcome>)> = JoinSet::new();

        for spec in self.services {
            let runner = Arc::clone(&self.runner);
            let shutdown = shutdown.clone();
            let name = spec.name.clone();

            tasks.spawn(async move {
                let outcome = runner.run_service(spec, shutdown).await;
                (name, outcome)
            });
        }
        drop(shutdown);

        let mut cancelled = false;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((name, Ok(ServiceOutcome::Success))) => {
                    info!(service = %name, "service finished");
                }
                Ok((name, Ok(ServiceOutcome::Failed(code)))) => {
                    warn!(service = %name, exit_code = code, "service exited with failure");
                }
                Ok((name, Err(DevserveError::Cancelled))) => {
                    info!(service = %name, "service stopped after shutdown request");
                    cancelled = true;
                }
                Ok((name, Err(err))) => {
                    error!(service = %name, error = %err, "service launch failed");
                }
                Err(err) => {
                    error!(error = %err, "service task panicked");
                }
            }
        }

        info!("supervisor finished; all services have stopped");

        if cancelled {
            Err(DevserveError::Cancelled)
        } else {
            Ok(())
        }
    }
}
