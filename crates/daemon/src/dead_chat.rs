// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dead-chat handling (spec §4.9): when the chat adapter reports a chat as
//! permanently unreachable, purge every trace of it from the daemon's
//! in-memory state and persisted config.

use touchgrass_core::{ChatId, Config};

use crate::board_tracker::BoardTracker;
use crate::session_manager::SessionManager;

/// Unsubscribe/detach `chat_id` from every session, drop its status
/// boards, and strip it from every channel's linked-groups list.
pub fn purge_dead_chat(sessions: &SessionManager, boards: &BoardTracker, config: &mut Config, chat_id: &ChatId) {
    sessions.purge_chat(chat_id);

    // One pinned status board per chat, keyed `"default"`.
    boards.clear_board(chat_id, "default");

    for channel in config.channels.values_mut() {
        channel.linked_groups.retain(|group| &group.chat_id != chat_id);
    }
}

#[cfg(test)]
#[path = "dead_chat_tests.rs"]
mod tests;
