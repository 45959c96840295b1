// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process layout: state directory and the fixed file paths under it
//! (spec §6). Every path the daemon writes lives under one directory so
//! `tg doctor` and the auto-stop cleanup only need to know one root.

use std::path::{Path, PathBuf};

/// Resolve the state directory: `TOUCHGRASS_STATE_DIR` >
/// `XDG_STATE_HOME/touchgrass` > `~/.local/state/touchgrass`.
pub fn state_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TOUCHGRASS_STATE_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join("touchgrass");
    }
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".local/state/touchgrass")
}

pub fn pid_path(state_dir: &Path) -> PathBuf {
    state_dir.join("daemon.pid")
}

pub fn lock_path(state_dir: &Path) -> PathBuf {
    state_dir.join("daemon.lock")
}

pub fn sock_path(state_dir: &Path) -> PathBuf {
    state_dir.join("daemon.sock")
}

pub fn port_path(state_dir: &Path) -> PathBuf {
    state_dir.join("daemon.port")
}

pub fn auth_token_path(state_dir: &Path) -> PathBuf {
    state_dir.join("auth-token")
}

pub fn sessions_dir(state_dir: &Path) -> PathBuf {
    state_dir.join("sessions")
}

pub fn status_boards_path(state_dir: &Path) -> PathBuf {
    state_dir.join("status-boards.json")
}

pub fn config_path(state_dir: &Path) -> PathBuf {
    state_dir.join("config.json")
}

/// Length (in hex characters) of a generated auth token.
pub const AUTH_TOKEN_LEN: usize = 32;

/// Generate a fresh auth token: fixed-length lowercase hex.
pub fn generate_auth_token() -> String {
    nanoid::nanoid!(AUTH_TOKEN_LEN, &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f'])
}

/// Constant-time comparison, so a timing side-channel can't shorten an
/// auth-token brute force to one byte at a time.
pub fn tokens_match(expected: &str, supplied: &str) -> bool {
    if expected.len() != supplied.len() {
        return false;
    }
    let mut diff = 0u8;
    for (a, b) in expected.bytes().zip(supplied.bytes()) {
        diff |= a ^ b;
    }
    diff == 0
}

/// TCP port override. When set, the daemon listens on localhost TCP
/// instead of the Unix socket.
pub fn tcp_port_override() -> Option<u16> {
    std::env::var("TOUCHGRASS_TCP_PORT").ok().and_then(|s| s.parse().ok())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
