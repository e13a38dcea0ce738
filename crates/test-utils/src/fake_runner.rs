use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use devserve::errors::{DevserveError, Result};
use devserve::exec::ServiceRunner;
use devserve::supervise::{ServiceOutcome, ServiceSpec};

/// Scripted behaviour for one fake service.
#[derive(Debug, Clone, Copy)]
pub enum FakeBehaviour {
    /// Complete immediately with a successful outcome.
    ExitSuccess,
    /// Complete immediately with the given exit code.
    ExitFailure(i32),
    /// Keep "running" until the shutdown signal fires, then unwind with
    /// `Cancelled` like a killed real process would.
    RunUntilShutdown,
}

/// A fake runner that:
/// - records which services were "launched"
/// - completes each one according to its scripted behaviour.
pub struct FakeServiceRunner {
    behaviours: HashMap<String, FakeBehaviour>,
    started: Arc<Mutex<Vec<String>>>,
}

impl FakeServiceRunner {
    pub fn new(started: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            behaviours: HashMap::new(),
            started,
        }
    }

    /// Script a behaviour for one service; unscripted services exit
    /// successfully right away.
    pub fn with_behaviour(mut self, service: &str, behaviour: FakeBehaviour) -> Self {
        self.behaviours.insert(service.to_string(), behaviour);
        self
    }
}

impl ServiceRunner for FakeServiceRunner {
    fn run_service(
        &self,
        spec: ServiceSpec,
        mut shutdown: watch::Receiver<bool>,
    ) -> Pin<Box<dyn Future<Output = Result<ServiceOutcome>> + Send>> {
        let behaviour = self
            .behaviours
            .get(&spec.name)
            .copied()
            .unwrap_or(FakeBehaviour::ExitSuccess);
        let started = Arc::clone(&self.started);

        Box::pin(async move {
            started.lock().unwrap().push(spec.name.clone());

            match behaviour {
                FakeBehaviour::ExitSuccess => Ok(ServiceOutcome::Success),
                FakeBehaviour::ExitFailure(code) => Ok(ServiceOutcome::Failed(code)),
                FakeBehaviour::RunUntilShutdown => {
                    let _ = shutdown.wait_for(|stop| *stop).await;
                    Err(DevserveError::Cancelled)
                }
            }
        })
    }
}
