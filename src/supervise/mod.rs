// src/supervise/mod.rs

//! Supervision layer: runs the fixed set of configured services concurrently
//! and waits for all of them.
//!
//! Services are independent: one exiting or failing never cancels its
//! siblings. The only whole-group event is the shutdown signal, which every
//! in-flight runner observes and answers by force-killing its child.

use std::fmt;
use std::sync::Arc;

use crate::sink::LineSink;
use crate::types::CommandLine;

/// Canonical service name type used throughout the supervision layer.
pub type ServiceName = String;

/// Outcome of a service process.
///
/// A non-zero exit is data, not an error: the supervisor logs it and moves
/// on, matching the best-effort semantics of a dev-server launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceOutcome {
    Success,
    Failed(i32),
}

/// Everything needed to launch and supervise one service.
///
/// The set of specs is fixed when the supervisor starts; there is no dynamic
/// add/remove.
pub struct ServiceSpec {
    pub name: ServiceName,
    pub cmd: CommandLine,

    /// Executable name for the preflight kill-by-name cleanup, or `None` to
    /// skip the cleanup for this service.
    pub kill_stale: Option<String>,

    pub stdout_sink: Arc<dyn LineSink>,
    pub stderr_sink: Arc<dyn LineSink>,
}

impl fmt::Debug for ServiceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceSpec")
            .field("name", &self.name)
            .field("cmd", &self.cmd)
            .field("kill_stale", &self.kill_stale)
            .finish_non_exhaustive()
    }
}

pub mod supervisor;

pub use supervisor::Supervisor;
