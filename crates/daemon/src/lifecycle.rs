// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle (spec §4.10): PID/lock-file handling, the
//! `ensureDaemon` staleness decision, redundant-daemon reaping, and the
//! auto-stop/stale-session timers. Adapted from the teacher's
//! `oj-daemon` lifecycle module — same lock-file-first-then-bind
//! ordering, same "only clean up on failures that aren't a lock
//! conflict" discipline.

use std::io::Write;
use std::path::Path;

use fs2::FileExt;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("another daemon instance already holds the lock")]
    LockFailed(#[source] std::io::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to signal process {0}: {1}")]
    Signal(i32, nix::errno::Errno),
}

/// Acquire the exclusive lock file, writing our own PID into it. The lock
/// is held for the lifetime of the returned file; dropping it releases it.
pub fn acquire_lock(lock_path: &Path) -> Result<std::fs::File, LifecycleError> {
    if let Some(parent) = lock_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new().write(true).create(true).truncate(false).open(lock_path)?;
    file.try_lock_exclusive().map_err(LifecycleError::LockFailed)?;

    let mut file = file;
    file.set_len(0)?;
    writeln!(file, "{}", std::process::id())?;
    Ok(file)
}

pub fn remove_process_files(state_dir: &Path) {
    let _ = std::fs::remove_file(crate::env::pid_path(state_dir));
    let _ = std::fs::remove_file(crate::env::sock_path(state_dir));
    let _ = std::fs::remove_file(crate::env::port_path(state_dir));
    let _ = std::fs::remove_file(crate::env::auth_token_path(state_dir));
}

/// Whether a process with this pid still exists (signal 0 probe).
pub fn process_alive(pid: u32) -> bool {
    signal::kill(Pid::from_raw(pid as i32), None).is_ok()
}

/// Ask a process to terminate, escalating from `SIGTERM` to `SIGKILL`
/// after `grace`. Used both for redundant-daemon reaping (200 ms grace,
/// spec §4.10) and for interactive-mode `Stop` (1 s grace, spec §5).
pub async fn terminate_with_grace(pid: u32, grace: std::time::Duration) -> Result<(), LifecycleError> {
    let target = Pid::from_raw(pid as i32);
    signal::kill(target, Signal::SIGTERM).map_err(|e| LifecycleError::Signal(pid as i32, e))?;
    tokio::time::sleep(grace).await;
    if process_alive(pid) {
        signal::kill(target, Signal::SIGKILL).map_err(|e| LifecycleError::Signal(pid as i32, e))?;
    }
    Ok(())
}

/// The `ensureDaemon` restart decision (spec §4.10): a running daemon is
/// only replaced when it's strictly older than the newest source/binary,
/// `/status` answers, and it reports zero active sessions.
pub fn should_restart_daemon(daemon_started_at: u64, newest_binary_mtime: u64, status_reachable: bool, active_sessions: usize) -> bool {
    status_reachable && active_sessions == 0 && daemon_started_at < newest_binary_mtime
}

/// `ensureDaemon` polls `/health` up to this many times, 250 ms apart
/// (spec §5's timeout note), before giving up and reporting a failure.
pub const HEALTH_POLL_ATTEMPTS: u32 = 20;
pub const HEALTH_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(250);

/// Auto-stop delay after the last session ends (spec §4.10).
pub const AUTO_STOP_DELAY: std::time::Duration = std::time::Duration::from_secs(30);

/// Stale-session reaper interval and max heartbeat age (spec §4.10).
pub const REAPER_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);
pub const STALE_SESSION_MAX_AGE_MS: u64 = 30_000;

/// Background-job/status-board reconciliation interval (spec §4.8).
pub const BOARD_RECONCILE_INTERVAL: std::time::Duration = std::time::Duration::from_secs(30);

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
