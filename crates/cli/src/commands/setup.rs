// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tg setup`: first-run walkthrough — start the daemon, print a pairing
//! code, and wait for the owner to link their chat account.

use crate::ensure_daemon::ensure_daemon;
use crate::exit_error::ExitError;

pub async fn run() -> Result<(), ExitError> {
    let daemon = ensure_daemon().await?;
    println!("touchgrass daemon is running (state dir: {}).", daemon.state_dir.display());

    let channels = daemon.client.channels().await.map_err(ExitError::from)?;
    if !channels.is_empty() {
        println!("Already linked to {} channel(s):", channels.len());
        for c in &channels {
            println!("  {} ({})", c.title, c.chat_id);
        }
        return Ok(());
    }

    let response = daemon.client.generate_code("telegram").await.map_err(ExitError::from)?;
    println!();
    println!("No chat channel linked yet. Pairing code: {}", response.code);
    println!("Message your Telegram bot with this code to finish setup.");
    println!("Run `tg channels` afterwards to confirm the link.");
    Ok(())
}
