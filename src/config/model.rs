// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::{LineFormat, StreamLevel};

/// Top-level configuration as read from a TOML file, before validation.
///
/// This is a direct mapping of the config format:
///
/// ```toml
/// [default]
/// stdout = { level = "info", format = "plain" }
///
/// [service.caddy]
/// cmd = ["caddy", "run", "--config", ".caddyfile", "--adapter", "caddyfile", "--watch"]
/// stderr = { level = "info", format = "json" }
///
/// [service.php]
/// cmd = ["php-cgi", "-b", "127.0.0.1:9090"]
/// stderr = { level = "error" }
/// ```
///
/// All sections except `[service.<name>]` are optional and have reasonable
/// defaults. Use `ConfigFile::try_from` to obtain a validated config.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Defaults for per-stream settings from `[default]`.
    #[serde(default)]
    pub default: DefaultSection,

    /// All services from `[service.<name>]`.
    ///
    /// Keys are the *service names* (e.g. `"caddy"`, `"php"`).
    #[serde(default)]
    pub service: BTreeMap<String, ServiceConfig>,
}

/// A configuration that has passed validation.
///
/// Construct via `ConfigFile::try_from(raw)`; the fields are the same as in
/// [`RawConfigFile`], but the invariants from `config::validate` are known to
/// hold.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub default: DefaultSection,
    pub service: BTreeMap<String, ServiceConfig>,
}

impl ConfigFile {
    /// Build a `ConfigFile` without running validation.
    ///
    /// Only `config::validate` should call this.
    pub(crate) fn new_unchecked(
        default: DefaultSection,
        service: BTreeMap<String, ServiceConfig>,
    ) -> Self {
        Self { default, service }
    }
}

/// `[default]` section: stream settings applied to services that do not
/// override them.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DefaultSection {
    /// Default settings for every service's stdout.
    #[serde(default)]
    pub stdout: Option<StreamConfig>,

    /// Default settings for every service's stderr.
    #[serde(default)]
    pub stderr: Option<StreamConfig>,
}

/// Per-stream logging settings.
///
/// Both fields are optional so a service can override just the level or just
/// the format; unset fields fall back to `[default]`, then to the built-in
/// defaults (level `info`, format `plain`).
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct StreamConfig {
    #[serde(default)]
    pub level: Option<StreamLevel>,

    #[serde(default)]
    pub format: Option<LineFormat>,
}

/// `[service.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// The command to launch: program plus arguments.
    ///
    /// Must be non-empty; the first element is the executable name or path.
    pub cmd: Vec<String>,

    /// Optional settings for the service's stdout.
    #[serde(default)]
    pub stdout: Option<StreamConfig>,

    /// Optional settings for the service's stderr.
    #[serde(default)]
    pub stderr: Option<StreamConfig>,

    /// Whether to kill stale instances of this executable before launching.
    ///
    /// The cleanup is best-effort: its outcome is never inspected.
    #[serde(default = "default_preflight")]
    pub preflight: bool,

    /// Executable name handed to the kill-by-name cleanup.
    ///
    /// If `None`, the file name of `cmd[0]` is used.
    #[serde(default)]
    pub kill_name: Option<String>,
}

fn default_preflight() -> bool {
    true
}

/// Which of the two output streams a setting applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamKind::Stdout => "stdout",
            StreamKind::Stderr => "stderr",
        }
    }
}

/// Fully-resolved per-stream settings after merging service, `[default]` and
/// built-in defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedStream {
    pub level: StreamLevel,
    pub format: LineFormat,
}

impl ServiceConfig {
    /// Resolve the effective settings for one stream of this service.
    ///
    /// Field-wise fallback: service value, then `[default]` value, then the
    /// built-in default (`info` / `plain`).
    pub fn effective_stream(&self, kind: StreamKind, defaults: &DefaultSection) -> ResolvedStream {
        let (own, shared) = match kind {
            StreamKind::Stdout => (self.stdout, defaults.stdout),
            StreamKind::Stderr => (self.stderr, defaults.stderr),
        };

        let level = own
            .and_then(|s| s.level)
            .or_else(|| shared.and_then(|s| s.level))
            .unwrap_or_default();
        let format = own
            .and_then(|s| s.format)
            .or_else(|| shared.and_then(|s| s.format))
            .unwrap_or_default();

        ResolvedStream { level, format }
    }
}
