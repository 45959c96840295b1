// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ensureDaemon` (spec §4.10): make sure a live, up-to-date daemon is
//! listening before any command that needs one runs. Adapted from the
//! teacher's `oj` binary-discovery pattern in `commands/daemon.rs`, but
//! without a persistent `DaemonClient` to ask version questions of —
//! staleness here is decided by comparing `started_at` against this
//! binary's own mtime, the way `touchgrass_daemon::lifecycle` already
//! expects to be called.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::UNIX_EPOCH;

use touchgrass_daemon::{env, lifecycle};

use crate::client_error::ClientError;
use crate::daemon_client::DaemonClient;
use crate::exit_error::ExitError;

#[derive(Clone)]
pub struct Daemon {
    pub client: DaemonClient,
    pub state_dir: PathBuf,
    pub auth_token: String,
}

/// Locate the daemon's own state directory and make sure a healthy,
/// current daemon is listening there, starting or restarting it if not.
pub async fn ensure_daemon() -> Result<Daemon, ExitError> {
    let state_dir = env::state_dir();
    std::fs::create_dir_all(&state_dir)
        .map_err(|e| ExitError::config(format!("could not create state directory: {e}")))?;

    let auth_token = read_or_create_auth_token(&state_dir)?;
    let tcp_port = env::tcp_port_override();
    let client = DaemonClient::new(env::sock_path(&state_dir), tcp_port, auth_token.clone());

    if let Some(health) = poll_health(&client, 1).await {
        if !is_stale(&client, health.started_at).await {
            reap_duplicate_daemons(&state_dir, health.pid).await;
            return Ok(Daemon { client, state_dir, auth_token });
        }
        let _ = client.shutdown().await;
        tokio::time::sleep(std::time::Duration::from_millis(300)).await;
    }

    spawn_daemon(&state_dir)?;

    if poll_health(&client, lifecycle::HEALTH_POLL_ATTEMPTS).await.is_some() {
        Ok(Daemon { client, state_dir, auth_token })
    } else {
        Err(ExitError::config("touchgrass daemon did not become healthy in time"))
    }
}

async fn is_stale(client: &DaemonClient, daemon_started_at: u64) -> bool {
    let newest_binary_mtime = newest_binary_mtime();
    match client.status().await {
        Ok(status) => lifecycle::should_restart_daemon(
            daemon_started_at,
            newest_binary_mtime,
            true,
            status.sessions.len(),
        ),
        Err(_) => false,
    }
}

async fn poll_health(client: &DaemonClient, attempts: u32) -> Option<touchgrass_wire::HealthResponse> {
    for attempt in 0..attempts.max(1) {
        match client.health().await {
            Ok(health) => return Some(health),
            Err(ClientError::DaemonNotRunning | ClientError::Connect(_) | ClientError::Timeout) => {
                if attempt + 1 < attempts {
                    tokio::time::sleep(lifecycle::HEALTH_POLL_INTERVAL).await;
                }
            }
            Err(_) => return None,
        }
    }
    None
}

/// Reap any other `tgd` processes still holding the lock file stale —
/// the PID file always tracks the current lock-holder, so anything else
/// answering on the socket before we rebound it is a duplicate.
async fn reap_duplicate_daemons(state_dir: &std::path::Path, authoritative_pid: u32) {
    let pid_path = env::pid_path(state_dir);
    let Ok(contents) = std::fs::read_to_string(&pid_path) else { return };
    let Some(recorded_pid) = contents.trim().parse::<u32>().ok() else { return };
    if recorded_pid != authoritative_pid && lifecycle::process_alive(recorded_pid) {
        let _ = lifecycle::terminate_with_grace(recorded_pid, std::time::Duration::from_millis(200)).await;
    }
}

fn spawn_daemon(state_dir: &std::path::Path) -> Result<(), ExitError> {
    let binary = find_tgd_binary();
    let log_path = state_dir.join("daemon.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| ExitError::config(format!("could not open daemon log: {e}")))?;
    let stderr_file = log_file
        .try_clone()
        .map_err(|e| ExitError::config(format!("could not open daemon log: {e}")))?;

    std::process::Command::new(binary)
        .stdin(Stdio::null())
        .stdout(log_file)
        .stderr(stderr_file)
        .spawn()
        .map_err(|e| ExitError::config(format!("could not start touchgrass daemon: {e}")))?;
    Ok(())
}

fn read_or_create_auth_token(state_dir: &std::path::Path) -> Result<String, ExitError> {
    let path = env::auth_token_path(state_dir);
    if let Ok(existing) = std::fs::read_to_string(&path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }
    let token = env::generate_auth_token();
    std::fs::write(&path, &token).map_err(|e| ExitError::config(format!("could not write auth token: {e}")))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600));
    }
    Ok(token)
}

fn find_tgd_binary() -> PathBuf {
    let current_exe = std::env::current_exe().ok();
    if let Some(ref exe) = current_exe {
        if let Some(dir) = exe.parent() {
            let sibling = dir.join("tgd");
            if sibling.exists() {
                return sibling;
            }
        }
    }
    PathBuf::from("tgd")
}

fn newest_binary_mtime() -> u64 {
    std::env::current_exe()
        .ok()
        .and_then(|p| std::fs::metadata(p).ok())
        .and_then(|m| m.modified().ok())
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "ensure_daemon_tests.rs"]
mod tests;
