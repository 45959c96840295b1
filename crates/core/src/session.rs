// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session record: a single assistant CLI invocation bridged to chat.

use crate::actions::RemoteControlAction;
use crate::id::SessionId;
use crate::namespace::{ChatId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// A single assistant CLI invocation bridged to chat.
///
/// Owned exclusively by the Session Manager. `input_queue` and
/// `control_action` are drained atomically (take-and-clear) so control
/// cannot be starved by a backlog of queued input, and vice versa.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub command: String,
    pub cwd: String,
    pub chat_id: ChatId,
    pub owner_user_id: UserId,
    pub created_at: u64,
    pub last_heartbeat_at: u64,

    #[serde(default)]
    pub input_queue: VecDeque<String>,
    #[serde(default)]
    pub control_action: Option<RemoteControlAction>,

    /// Additional chats fanned out to beyond the primary.
    #[serde(default)]
    pub group_subscriptions: HashSet<ChatId>,
}

impl Session {
    pub fn new(
        id: SessionId,
        command: impl Into<String>,
        cwd: impl Into<String>,
        chat_id: ChatId,
        owner_user_id: UserId,
        now_ms: u64,
    ) -> Self {
        Self {
            id,
            command: command.into(),
            cwd: cwd.into(),
            chat_id,
            owner_user_id,
            created_at: now_ms,
            last_heartbeat_at: now_ms,
            input_queue: VecDeque::new(),
            control_action: None,
            group_subscriptions: HashSet::new(),
        }
    }

    /// Atomically take and clear the queued input, preserving order.
    pub fn drain_input(&mut self) -> Vec<String> {
        self.input_queue.drain(..).collect()
    }

    /// Atomically take and clear the pending control action.
    pub fn drain_control(&mut self) -> Option<RemoteControlAction> {
        self.control_action.take()
    }

    /// Enqueue a control action, merging with whatever is already pending.
    pub fn enqueue_control(&mut self, action: RemoteControlAction) {
        self.control_action = Some(RemoteControlAction::merge(self.control_action.take(), action));
    }

    pub fn is_stale(&self, now_ms: u64, max_age_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_heartbeat_at) > max_age_ms
    }
}

/// Fan-out set of chats beyond a session's primary chat.
pub type GroupSubscription = HashSet<ChatId>;

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
