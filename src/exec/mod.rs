// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually launching and supervising the
//! commands defined for each service, using `tokio::process::Command`, and
//! multiplexing their output into the configured sinks.
//!
//! - [`line_reader`] splits one output stream into newline-delimited records.
//! - [`runner`] spawns a child, drains both streams concurrently, and waits
//!   for exit or cancellation.
//! - [`preflight`] is the best-effort kill-by-name cleanup run before each
//!   launch.
//! - [`backend`] provides the `ServiceRunner` trait and a concrete
//!   `RealServiceRunner` that the supervisor uses in production, and which
//!   tests can replace with a fake implementation.

pub mod backend;
pub mod line_reader;
pub mod preflight;
pub mod runner;

pub use backend::{RealServiceRunner, ServiceRunner};
pub use line_reader::forward_lines;
pub use preflight::kill_stale;
pub use runner::run_process;
