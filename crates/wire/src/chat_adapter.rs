// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The chat-network adapter interface named in spec §1.
//!
//! This is a thin, named boundary — not a redesign target. The daemon
//! depends only on this trait; a concrete adapter (Telegram, or the
//! reference long-poll adapter in `touchgrass-adapters`) supplies it.

use async_trait::async_trait;
use touchgrass_core::ChatId;

#[derive(Debug, Clone)]
pub struct ChatSummary {
    pub chat_id: ChatId,
    pub title: String,
    pub is_group: bool,
}

#[derive(Debug, Clone)]
pub struct PollAnswer {
    pub poll_id: String,
    pub chat_id: ChatId,
    pub user_id: touchgrass_core::UserId,
    pub selected_indices: Vec<usize>,
    pub free_text: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatAdapterError {
    #[error("chat network error: {0}")]
    Network(String),
    #[error("chat {0} is not reachable (dead chat)")]
    DeadChat(String),
}

/// Interface the daemon drives a chat network through. Implementations are
/// expected to retry transient failures internally; a [`ChatAdapterError`]
/// means the daemon should treat the call as failed for this attempt.
#[async_trait]
pub trait ChatAdapter: Send + Sync {
    async fn send(&self, chat_id: &ChatId, text: &str) -> Result<(), ChatAdapterError>;

    /// Send a poll/selection widget; returns the adapter-assigned poll id.
    async fn send_poll(
        &self,
        chat_id: &ChatId,
        question: &str,
        options: &[String],
    ) -> Result<String, ChatAdapterError>;

    async fn send_document(
        &self,
        chat_id: &ChatId,
        filename: &str,
        bytes: &[u8],
    ) -> Result<(), ChatAdapterError>;

    async fn set_typing(&self, chat_id: &ChatId, on: bool) -> Result<(), ChatAdapterError>;

    /// Confirm a chat id is still reachable (used before binding/linking).
    async fn validate_chat(&self, chat_id: &ChatId) -> Result<ChatSummary, ChatAdapterError>;

    /// Create or update the pinned status-board message for `(chat_id, board_key)`.
    async fn upsert_status_board(
        &self,
        chat_id: &ChatId,
        board_key: &str,
        body: &str,
    ) -> Result<String, ChatAdapterError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_chat_error_message_carries_chat_id() {
        let err = ChatAdapterError::DeadChat("telegram:42".into());
        assert_eq!(err.to_string(), "chat telegram:42 is not reachable (dead chat)");
    }
}
