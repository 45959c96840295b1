// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tg ls`: list sessions the daemon currently tracks.

use std::io::Write;

use touchgrass_wire::SessionSummary;

use crate::ensure_daemon::ensure_daemon;
use crate::exit_error::ExitError;
use crate::output::{format_time_ago, handle_list, OutputFormat};

pub async fn run(format: OutputFormat) -> Result<(), ExitError> {
    let daemon = ensure_daemon().await?;
    let status = daemon.client.status().await.map_err(ExitError::from)?;

    handle_list(format, &status.sessions, "No active sessions.", |items, out| {
        for s in items {
            let _ = writeln!(out, "{}", render_line(s));
        }
    })
    .map_err(|e| ExitError::config(e.to_string()))
}

fn render_line(s: &SessionSummary) -> String {
    format!("{}  {}  {}  started {}", s.id, s.command, s.state, format_time_ago(s.created_at))
}

#[cfg(test)]
#[path = "ls_tests.rs"]
mod tests;
