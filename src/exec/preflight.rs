// src/exec/preflight.rs

//! Best-effort termination of stale service instances before (re)launch.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

/// Kill any OS-wide running instance of `exe_name`, by name.
///
/// Advisory hygiene against leftovers from a previous run: a prior supervisor
/// that crashed or was killed hard may have left its children behind. Every
/// failure (no such process, missing kill utility, insufficient privilege) is
/// swallowed; callers never inspect the outcome and the launch sequence
/// continues regardless.
pub async fn kill_stale(exe_name: &str) {
    // Platform kill-by-name collaborator; output is discarded either way.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("taskkill");
        c.arg("/IM").arg(exe_name).arg("/F");
        c
    } else {
        let mut c = Command::new("pkill");
        c.arg("-x").arg(exe_name);
        c
    };

    cmd.stdout(Stdio::null()).stderr(Stdio::null());

    match cmd.status().await {
        Ok(status) => {
            debug!(
                exe = %exe_name,
                exit_code = ?status.code(),
                "stale-instance cleanup finished"
            );
        }
        Err(err) => {
            debug!(
                exe = %exe_name,
                error = %err,
                "stale-instance cleanup could not run"
            );
        }
    }
}
