// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared session-registration plumbing used by every launch-style
//! subcommand (`tg claude`, `tg resume`, `tg camp`): picking which chat
//! a session binds to, then registering it with the daemon.

use touchgrass_core::{ChatId, UserId};
use touchgrass_wire::{ChannelSummary, RegisterRequest, RegisterResponse};

use crate::ensure_daemon::Daemon;
use crate::exit_error::ExitError;

/// Resolve which chat a freshly launched session should bind to.
///
/// `--channel <value>` matches a linked group's chat id or title exactly;
/// without it, the single paired user's DM is used, which is only
/// unambiguous when exactly one channel is configured.
pub async fn resolve_chat(daemon: &Daemon, channel_filter: Option<&str>) -> Result<(ChatId, UserId), ExitError> {
    let channels = daemon.client.channels().await.map_err(ExitError::from)?;
    let found = pick_channel(&channels, channel_filter)?;
    Ok((found.chat_id.clone(), UserId::new(found.chat_id.as_str())))
}

fn pick_channel<'a>(
    channels: &'a [ChannelSummary],
    filter: Option<&str>,
) -> Result<&'a ChannelSummary, ExitError> {
    if let Some(filter) = filter {
        return channels
            .iter()
            .find(|c| c.chat_id.as_str() == filter || c.title == filter)
            .ok_or_else(|| ExitError::config(format!("no linked channel matches '{filter}'")));
    }

    match channels {
        [only] => Ok(only),
        [] => Err(ExitError::config(
            "no paired chat channel yet — run `tg pair` first, or pass --channel",
        )),
        _ => Err(ExitError::config(
            "multiple channels are linked — pass --channel to pick one",
        )),
    }
}

pub async fn register_session(
    daemon: &Daemon,
    command: &str,
    chat_id: ChatId,
    owner_user_id: UserId,
    cwd: &std::path::Path,
    existing_id: Option<String>,
) -> Result<RegisterResponse, ExitError> {
    let req = RegisterRequest {
        command: command.to_string(),
        chat_id,
        owner_user_id,
        cwd: cwd.to_string_lossy().into_owned(),
        existing_id,
        subscribed_groups: Vec::new(),
    };
    daemon.client.register(&req).await.map_err(ExitError::from)
}

#[cfg(test)]
#[path = "bootstrap_tests.rs"]
mod tests;
