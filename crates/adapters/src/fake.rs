// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An in-memory [`ChatAdapter`] recording every call, for daemon tests
//! that need to assert *what* was sent without a real chat network.

use async_trait::async_trait;
use parking_lot::Mutex;
use touchgrass_core::ChatId;
use touchgrass_wire::{ChatAdapter, ChatAdapterError, ChatSummary};

#[derive(Debug, Clone)]
pub enum RecordedCall {
    Send { chat_id: ChatId, text: String },
    SendPoll { chat_id: ChatId, question: String, options: Vec<String> },
    SendDocument { chat_id: ChatId, filename: String },
    SetTyping { chat_id: ChatId, on: bool },
    UpsertStatusBoard { chat_id: ChatId, board_key: String, body: String },
}

/// Chats in this set fail every send/poll call with [`ChatAdapterError::DeadChat`].
#[derive(Default)]
pub struct FakeChatAdapter {
    calls: Mutex<Vec<RecordedCall>>,
    dead_chats: Mutex<std::collections::HashSet<ChatId>>,
    next_poll_id: Mutex<u64>,
}

impl FakeChatAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_dead(&self, chat_id: ChatId) {
        self.dead_chats.lock().insert(chat_id);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    fn check_alive(&self, chat_id: &ChatId) -> Result<(), ChatAdapterError> {
        if self.dead_chats.lock().contains(chat_id) {
            return Err(ChatAdapterError::DeadChat(chat_id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ChatAdapter for FakeChatAdapter {
    async fn send(&self, chat_id: &ChatId, text: &str) -> Result<(), ChatAdapterError> {
        self.check_alive(chat_id)?;
        self.calls.lock().push(RecordedCall::Send { chat_id: chat_id.clone(), text: text.to_string() });
        Ok(())
    }

    async fn send_poll(
        &self,
        chat_id: &ChatId,
        question: &str,
        options: &[String],
    ) -> Result<String, ChatAdapterError> {
        self.check_alive(chat_id)?;
        self.calls.lock().push(RecordedCall::SendPoll {
            chat_id: chat_id.clone(),
            question: question.to_string(),
            options: options.to_vec(),
        });
        let mut next = self.next_poll_id.lock();
        *next += 1;
        Ok(format!("poll-{next}"))
    }

    async fn send_document(
        &self,
        chat_id: &ChatId,
        filename: &str,
        _bytes: &[u8],
    ) -> Result<(), ChatAdapterError> {
        self.check_alive(chat_id)?;
        self.calls.lock().push(RecordedCall::SendDocument {
            chat_id: chat_id.clone(),
            filename: filename.to_string(),
        });
        Ok(())
    }

    async fn set_typing(&self, chat_id: &ChatId, on: bool) -> Result<(), ChatAdapterError> {
        self.check_alive(chat_id)?;
        self.calls.lock().push(RecordedCall::SetTyping { chat_id: chat_id.clone(), on });
        Ok(())
    }

    async fn validate_chat(&self, chat_id: &ChatId) -> Result<ChatSummary, ChatAdapterError> {
        self.check_alive(chat_id)?;
        Ok(ChatSummary {
            chat_id: chat_id.clone(),
            title: chat_id.native_id().to_string(),
            is_group: chat_id.thread().is_some(),
        })
    }

    async fn upsert_status_board(
        &self,
        chat_id: &ChatId,
        board_key: &str,
        body: &str,
    ) -> Result<String, ChatAdapterError> {
        self.check_alive(chat_id)?;
        self.calls.lock().push(RecordedCall::UpsertStatusBoard {
            chat_id: chat_id.clone(),
            board_key: board_key.to_string(),
            body: body.to_string(),
        });
        Ok(format!("msg-{board_key}"))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
