// src/types.rs

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

/// Severity used when re-emitting a line from a supervised stream.
///
/// This is a config-level enum, deliberately narrower than a full tracing
/// level: supervised output is always an event, never a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for StreamLevel {
    fn default() -> Self {
        StreamLevel::Info
    }
}

impl FromStr for StreamLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(StreamLevel::Debug),
            "info" => Ok(StreamLevel::Info),
            "warn" | "warning" => Ok(StreamLevel::Warn),
            "error" => Ok(StreamLevel::Error),
            other => Err(format!(
                "invalid stream level: {other} (expected \"debug\", \"info\", \"warn\" or \"error\")"
            )),
        }
    }
}

/// How a raw output line is rendered before logging.
///
/// - `Plain`: pass the line through untouched (default).
/// - `Json`: parse the line as JSON and pretty-print it; if the line is not
///   valid JSON, fall back to logging it raw. Parsing never stops the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineFormat {
    Plain,
    Json,
}

impl Default for LineFormat {
    fn default() -> Self {
        LineFormat::Plain
    }
}

/// A fully-resolved command line: program plus arguments.
///
/// Invariant: the argv is non-empty and the program (first element) is a
/// non-empty string. Constructed once from configuration and then passed
/// around immutably.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    argv: Vec<String>,
}

impl CommandLine {
    /// Build a `CommandLine` from an argv vector, enforcing the invariant.
    pub fn from_argv(argv: Vec<String>) -> Result<Self, String> {
        match argv.first() {
            None => Err("command must have at least one element (the program)".to_string()),
            Some(program) if program.trim().is_empty() => {
                Err("command program (first element) must be non-empty".to_string())
            }
            Some(_) => Ok(Self { argv }),
        }
    }

    /// The executable name or path.
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Arguments after the program.
    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    /// The file name of the program, for kill-by-name cleanup.
    ///
    /// `/usr/bin/php-cgi` -> `php-cgi`. Falls back to the raw program string
    /// when there is no file-name component.
    pub fn program_file_name(&self) -> String {
        Path::new(self.program())
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program().to_string())
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}
