#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use devserve::config::{ConfigFile, DefaultSection, RawConfigFile, ServiceConfig, StreamConfig};
use devserve::sink::LineSink;
use devserve::supervise::ServiceSpec;
use devserve::types::{CommandLine, LineFormat, StreamLevel};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                default: DefaultSection::default(),
                service: BTreeMap::new(),
            },
        }
    }

    pub fn with_service(mut self, name: &str, service: ServiceConfig) -> Self {
        self.config.service.insert(name.to_string(), service);
        self
    }

    pub fn with_default_stdout(mut self, level: StreamLevel, format: LineFormat) -> Self {
        self.config.default.stdout = Some(StreamConfig {
            level: Some(level),
            format: Some(format),
        });
        self
    }

    pub fn with_default_stderr(mut self, level: StreamLevel, format: LineFormat) -> Self {
        self.config.default.stderr = Some(StreamConfig {
            level: Some(level),
            format: Some(format),
        });
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ServiceConfig`.
pub struct ServiceConfigBuilder {
    service: ServiceConfig,
}

impl ServiceConfigBuilder {
    pub fn new(cmd: &[&str]) -> Self {
        Self {
            service: ServiceConfig {
                cmd: cmd.iter().map(|s| s.to_string()).collect(),
                stdout: None,
                stderr: None,
                preflight: true,
                kill_name: None,
            },
        }
    }

    pub fn stdout(mut self, level: StreamLevel, format: LineFormat) -> Self {
        self.service.stdout = Some(StreamConfig {
            level: Some(level),
            format: Some(format),
        });
        self
    }

    pub fn stderr(mut self, level: StreamLevel, format: LineFormat) -> Self {
        self.service.stderr = Some(StreamConfig {
            level: Some(level),
            format: Some(format),
        });
        self
    }

    pub fn stderr_level(mut self, level: StreamLevel) -> Self {
        self.service.stderr = Some(StreamConfig {
            level: Some(level),
            format: None,
        });
        self
    }

    pub fn no_preflight(mut self) -> Self {
        self.service.preflight = false;
        self
    }

    pub fn kill_name(mut self, name: &str) -> Self {
        self.service.kill_name = Some(name.to_string());
        self
    }

    pub fn build(self) -> ServiceConfig {
        self.service
    }
}

/// A sink that records every accepted line, for asserting on delivery.
pub fn collecting_sink() -> (Arc<dyn LineSink>, Arc<Mutex<Vec<String>>>) {
    let lines: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&lines);
    let sink: Arc<dyn LineSink> = Arc::new(move |line: &str| {
        captured.lock().unwrap().push(line.to_string());
    });
    (sink, lines)
}

/// A sink that discards everything.
pub fn noop_sink() -> Arc<dyn LineSink> {
    Arc::new(|_: &str| {})
}

/// Minimal launchable spec for supervisor tests; output is discarded and no
/// preflight cleanup runs.
pub fn service_spec(name: &str, argv: &[&str]) -> ServiceSpec {
    ServiceSpec {
        name: name.to_string(),
        cmd: CommandLine::from_argv(argv.iter().map(|s| s.to_string()).collect())
            .expect("builder argv must be a valid command"),
        kill_stale: None,
        stdout_sink: noop_sink(),
        stderr_sink: noop_sink(),
    }
}
