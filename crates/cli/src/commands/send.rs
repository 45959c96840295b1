// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tg send <id> <text>` / `tg send --file <id> <path>`: push a line of
//! input into a running session's queue (spec §6).

use clap::Args;

use crate::ensure_daemon::ensure_daemon;
use crate::exit_error::ExitError;

#[derive(Args)]
pub struct SendArgs {
    /// Session id to send into
    pub id: String,

    /// Text to send, or a path when --file is given
    pub payload: String,

    /// Treat `payload` as a file path whose contents are sent
    #[arg(long)]
    pub file: bool,
}

pub async fn run(args: SendArgs) -> Result<(), ExitError> {
    let daemon = ensure_daemon().await?;
    let text = if args.file {
        std::fs::read_to_string(&args.payload)
            .map_err(|e| ExitError::config(format!("could not read {}: {e}", args.payload)))?
    } else {
        args.payload
    };

    daemon.client.send_input(&args.id, &text).await.map_err(ExitError::from)?;
    println!("sent to {}", args.id);
    Ok(())
}

#[cfg(test)]
#[path = "send_tests.rs"]
mod tests;
