// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tg pair`: mint a short-lived pairing code for a chat channel.

use clap::Args;

use crate::ensure_daemon::ensure_daemon;
use crate::exit_error::ExitError;
use crate::output::{format_or_json, OutputFormat};

#[derive(Args)]
pub struct PairArgs {
    /// Channel to pair (defaults to "telegram")
    #[arg(long, default_value = "telegram")]
    pub channel: String,
}

pub async fn run(args: PairArgs, format: OutputFormat) -> Result<(), ExitError> {
    let daemon = ensure_daemon().await?;
    let response = daemon.client.generate_code(&args.channel).await.map_err(ExitError::from)?;

    format_or_json(format, &response, || {
        println!("Pairing code: {}", response.code);
        println!("Send this code to the {} bot to link your account.", args.channel);
        println!("Expires at (epoch ms): {}", response.expires_at);
    })
    .map_err(|e| ExitError::config(e.to_string()))
}

#[cfg(test)]
#[path = "pair_tests.rs"]
mod tests;
