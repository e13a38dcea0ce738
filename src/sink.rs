// src/sink.rs

//! Line consumers connecting supervised output streams to logging.
//!
//! A [`LineSink`] receives one trimmed text line per invocation. Sinks are
//! called from the per-stream reader tasks, so up to four of them (two
//! services x two streams) can fire concurrently; [`LogSink`] routes into the
//! global `tracing` subscriber, which serializes the actual writes.

use std::fmt;

use tracing::{debug, error, info, warn};

use crate::types::{LineFormat, StreamLevel};

/// A consumer capability for one output stream.
///
/// Implementations must not block indefinitely: `accept` runs on the critical
/// reading path and a stalled sink stalls the stream it is draining.
pub trait LineSink: Send + Sync {
    fn accept(&self, line: &str);
}

/// Any `Fn(&str)` closure is a sink. Used heavily in tests.
impl<F> LineSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn accept(&self, line: &str) {
        self(line)
    }
}

/// Sink that re-emits each line as a `tracing` event tagged with the service
/// name and stream.
pub struct LogSink {
    service: String,
    stream: &'static str,
    level: StreamLevel,
    format: LineFormat,
}

impl LogSink {
    pub fn new(
        service: impl Into<String>,
        stream: &'static str,
        level: StreamLevel,
        format: LineFormat,
    ) -> Self {
        Self {
            service: service.into(),
            stream,
            level,
            format,
        }
    }
}

/// Render a raw line according to `format`.
///
/// `Json` pretty-prints the line; a line that fails to parse is passed
/// through raw. A formatting failure must never stop the stream that
/// produced the line.
pub fn format_line(format: LineFormat, line: &str) -> String {
    match format {
        LineFormat::Plain => line.to_string(),
        LineFormat::Json => match serde_json::from_str::<serde_json::Value>(line) {
            Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| line.to_string()),
            Err(err) => {
                debug!(error = %err, "line is not valid JSON; logging raw");
                line.to_string()
            }
        },
    }
}

impl LineSink for LogSink {
    fn accept(&self, line: &str) {
        let message = format_line(self.format, line);
        match self.level {
            StreamLevel::Debug => {
                debug!(service = %self.service, stream = self.stream, "{}", message)
            }
            StreamLevel::Info => {
                info!(service = %self.service, stream = self.stream, "{}", message)
            }
            StreamLevel::Warn => {
                warn!(service = %self.service, stream = self.stream, "{}", message)
            }
            StreamLevel::Error => {
                error!(service = %self.service, stream = self.stream, "{}", message)
            }
        }
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSink")
            .field("service", &self.service)
            .field("stream", &self.stream)
            .field("level", &self.level)
            .field("format", &self.format)
            .finish()
    }
}
