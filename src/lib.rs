// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod sink;
pub mod supervise;
pub mod types;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::model::ConfigFile;
use crate::config::{StreamKind, load_and_validate};
use crate::errors::{DevserveError, Result};
use crate::exec::RealServiceRunner;
use crate::sink::LogSink;
use crate::supervise::{ServiceSpec, Supervisor};
use crate::types::CommandLine;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - per-service sinks
/// - the supervisor and its real process runner
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    let selected = select_services(&cfg, &args.service)?;

    if args.dry_run {
        print_dry_run(&cfg, &selected);
        return Ok(());
    }

    let services = build_service_specs(&cfg, &selected)?;

    // Shutdown signal observed by every in-flight runner.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Ctrl-C → kill every child, then unwind.
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            return;
        }
        let _ = shutdown_tx.send(true);
    });

    let supervisor = Supervisor::new(RealServiceRunner, services);
    supervisor.run_all(shutdown_rx).await
}

/// Resolve the `--service` selection against the config.
///
/// With no `--service` flags, every configured service runs. Unknown names
/// are a configuration error; config-file order is preserved either way.
pub fn select_services(cfg: &ConfigFile, requested: &[String]) -> Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(cfg.service.keys().cloned().collect());
    }

    for name in requested {
        if !cfg.service.contains_key(name) {
            return Err(DevserveError::Config(format!(
                "unknown service '{name}' in --service; not present in the config file"
            )));
        }
    }

    Ok(cfg
        .service
        .keys()
        .filter(|k| requested.iter().any(|r| r == *k))
        .cloned()
        .collect())
}

/// Turn the selected config entries into launchable [`ServiceSpec`]s.
pub fn build_service_specs(cfg: &ConfigFile, selected: &[String]) -> Result<Vec<ServiceSpec>> {
    let mut specs = Vec::with_capacity(selected.len());

    for name in selected {
        let service = cfg
            .service
            .get(name)
            .ok_or_else(|| DevserveError::Config(format!("unknown service '{name}'")))?;

        let cmd = CommandLine::from_argv(service.cmd.clone())
            .map_err(|e| DevserveError::Config(format!("service '{name}': {e}")))?;

        let kill_stale = if service.preflight {
            Some(
                service
                    .kill_name
                    .clone()
                    .unwrap_or_else(|| cmd.program_file_name()),
            )
        } else {
            None
        };

        let stdout = service.effective_stream(StreamKind::Stdout, &cfg.default);
        let stderr = service.effective_stream(StreamKind::Stderr, &cfg.default);

        debug!(
            service = %name,
            ?stdout,
            ?stderr,
            ?kill_stale,
            "resolved service launch spec"
        );

        specs.push(ServiceSpec {
            name: name.clone(),
            cmd,
            kill_stale,
            stdout_sink: Arc::new(LogSink::new(
                name.clone(),
                StreamKind::Stdout.as_str(),
                stdout.level,
                stdout.format,
            )),
            stderr_sink: Arc::new(LogSink::new(
                name.clone(),
                StreamKind::Stderr.as_str(),
                stderr.level,
                stderr.format,
            )),
        });
    }

    Ok(specs)
}

/// Simple dry-run output: print the resolved services without launching.
fn print_dry_run(cfg: &ConfigFile, selected: &[String]) {
    println!("devserve dry-run");
    println!();

    println!("services ({}):", selected.len());
    for name in selected {
        let Some(service) = cfg.service.get(name) else {
            continue;
        };

        let stdout = service.effective_stream(StreamKind::Stdout, &cfg.default);
        let stderr = service.effective_stream(StreamKind::Stderr, &cfg.default);

        println!("  - {name}");
        println!("      cmd: {}", service.cmd.join(" "));
        println!(
            "      stdout: level={:?} format={:?}",
            stdout.level, stdout.format
        );
        println!(
            "      stderr: level={:?} format={:?}",
            stderr.level, stderr.format
        );

        if !service.preflight {
            println!("      preflight: disabled");
        } else if let Some(ref kill) = service.kill_name {
            println!("      kill_name: {kill}");
        } else if let Ok(cmd) = CommandLine::from_argv(service.cmd.clone()) {
            println!("      kill_name: {} (derived)", cmd.program_file_name());
        }
    }

    debug!("dry-run complete (no execution)");
}
