// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tg doctor`: check that the daemon is reachable, the state directory
//! is writable, and every assistant vendor binary is on `PATH`.

use touchgrass_adapters::Vendor;
use touchgrass_daemon::env;

use crate::ensure_daemon::ensure_daemon;
use crate::exit_error::ExitError;
use crate::output::{format_or_json, OutputFormat};

const VENDOR_BINARIES: &[&str] = &["claude", "codex", "pi", "kimi"];

fn binary_on_path(name: &str) -> bool {
    std::env::var_os("PATH").is_some_and(|path| {
        std::env::split_paths(&path).any(|dir| dir.join(name).is_file())
    })
}

pub async fn run(format: OutputFormat) -> Result<(), ExitError> {
    let state_dir = env::state_dir();
    let state_dir_writable = std::fs::create_dir_all(&state_dir).is_ok();

    let daemon_health = ensure_daemon().await.ok();
    let daemon_reachable = daemon_health.is_some();

    let vendors: Vec<_> = VENDOR_BINARIES
        .iter()
        .map(|name| (*name, binary_on_path(name)))
        .collect();
    // Every vendor name here is recognized by `Vendor::from_command` — a
    // debug-assert-style cross-check that the two lists stay in sync.
    debug_assert!(VENDOR_BINARIES.iter().all(|name| Vendor::from_command(name).is_some()));

    let report = serde_json::json!({
        "state_dir": state_dir.to_string_lossy(),
        "state_dir_writable": state_dir_writable,
        "daemon_reachable": daemon_reachable,
        "vendors": vendors.iter().map(|(n, ok)| serde_json::json!({"name": n, "on_path": ok})).collect::<Vec<_>>(),
    });

    format_or_json(format, &report, || {
        println!("state dir:       {} ({})", state_dir.display(), if state_dir_writable { "writable" } else { "NOT WRITABLE" });
        println!("daemon:          {}", if daemon_reachable { "reachable" } else { "NOT REACHABLE" });
        for (name, ok) in &vendors {
            println!("{name:<8} binary: {}", if *ok { "found" } else { "not found on PATH" });
        }
    })
    .map_err(|e| ExitError::config(e.to_string()))
}

#[cfg(test)]
#[path = "doctor_tests.rs"]
mod tests;
