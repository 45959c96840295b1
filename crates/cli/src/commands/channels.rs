// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tg channels`: list chat channels the daemon currently has linked.

use std::io::Write;

use crate::ensure_daemon::ensure_daemon;
use crate::exit_error::ExitError;
use crate::output::{handle_list, OutputFormat};

pub async fn run(format: OutputFormat) -> Result<(), ExitError> {
    let daemon = ensure_daemon().await?;
    let channels = daemon.client.channels().await.map_err(ExitError::from)?;

    handle_list(format, &channels, "No channels linked yet. Run `tg pair` to link one.", |items, out| {
        for c in items {
            let _ = writeln!(out, "{}", render_line(c));
        }
    })
    .map_err(|e| ExitError::config(e.to_string()))
}

fn render_line(c: &touchgrass_wire::ChannelSummary) -> String {
    let busy = if c.busy { " (busy)" } else { "" };
    format!("{}  {}  {}{busy}", c.chat_id, c.kind, c.title)
}

#[cfg(test)]
#[path = "channels_tests.rs"]
mod tests;
