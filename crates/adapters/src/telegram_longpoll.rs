// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A minimal Telegram long-poll [`ChatAdapter`]: enough to send messages,
//! polls, documents, and typing indicators, and to pull inbound updates off
//! `getUpdates`, so the workspace runs end-to-end without any other chat
//! framework. Production deployments can swap in a fuller adapter; this one
//! exists so `tgd` has something real to drive by default.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;
use touchgrass_core::{ChatId, UserId};
use touchgrass_wire::{ChatAdapter, ChatAdapterError, ChatSummary};

const LONG_POLL_TIMEOUT_SECS: u64 = 30;

/// One inbound chat message, normalized from a Telegram `Update`.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub text: String,
}

/// One inbound poll answer, normalized from a Telegram `Update`.
#[derive(Debug, Clone)]
pub struct InboundPollAnswer {
    pub poll_id: String,
    pub user_id: UserId,
    pub selected_indices: Vec<usize>,
}

#[derive(Debug, Default)]
pub struct InboundBatch {
    pub messages: Vec<InboundMessage>,
    pub poll_answers: Vec<InboundPollAnswer>,
}

pub struct TelegramLongPollAdapter {
    http: reqwest::Client,
    base_url: String,
    offset: Mutex<i64>,
    /// `(chat_id, board_key) -> telegram message_id`, so repeated
    /// `upsert_status_board` calls edit the same pinned message instead of
    /// sending a fresh one each time.
    board_messages: Mutex<HashMap<(ChatId, String), i64>>,
}

impl TelegramLongPollAdapter {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("https://api.telegram.org/bot{}", bot_token.into()),
            offset: Mutex::new(0),
            board_messages: Mutex::new(HashMap::new()),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }

    /// Long-poll `getUpdates` once, advancing the offset past whatever
    /// comes back. Callers loop this from the daemon's main task.
    pub async fn poll_updates(&self) -> Result<InboundBatch, ChatAdapterError> {
        let offset = *self.offset.lock().await;
        let resp = self
            .http
            .get(self.method_url("getUpdates"))
            .query(&[("timeout", LONG_POLL_TIMEOUT_SECS.to_string()), ("offset", offset.to_string())])
            .send()
            .await
            .map_err(|e| ChatAdapterError::Network(e.to_string()))?;

        let parsed: TelegramResponse<Vec<TelegramUpdate>> =
            resp.json().await.map_err(|e| ChatAdapterError::Network(e.to_string()))?;
        if !parsed.ok {
            return Err(ChatAdapterError::Network("getUpdates returned ok=false".to_string()));
        }
        let updates = parsed.result.unwrap_or_default();

        let mut batch = InboundBatch::default();
        let mut next_offset = offset;
        for update in updates {
            next_offset = next_offset.max(update.update_id + 1);
            if let Some(message) = update.message {
                if let (Some(text), Some(from)) = (message.text, message.from) {
                    batch.messages.push(InboundMessage {
                        chat_id: ChatId::new(format!("telegram:{}", message.chat.id)),
                        user_id: UserId::new(format!("telegram:{}", from.id)),
                        text,
                    });
                }
            }
            if let Some(answer) = update.poll_answer {
                batch.poll_answers.push(InboundPollAnswer {
                    poll_id: answer.poll_id,
                    user_id: UserId::new(format!("telegram:{}", answer.user.id)),
                    selected_indices: answer.option_ids,
                });
            }
        }
        *self.offset.lock().await = next_offset;
        Ok(batch)
    }
}

#[async_trait]
impl ChatAdapter for TelegramLongPollAdapter {
    async fn send(&self, chat_id: &ChatId, text: &str) -> Result<(), ChatAdapterError> {
        self.http
            .post(self.method_url("sendMessage"))
            .json(&json!({ "chat_id": chat_id.native_id(), "text": text }))
            .send()
            .await
            .map_err(|e| ChatAdapterError::Network(e.to_string()))?;
        Ok(())
    }

    async fn send_poll(
        &self,
        chat_id: &ChatId,
        question: &str,
        options: &[String],
    ) -> Result<String, ChatAdapterError> {
        let resp = self
            .http
            .post(self.method_url("sendPoll"))
            .json(&json!({
                "chat_id": chat_id.native_id(),
                "question": question,
                "options": options,
                "is_anonymous": false,
            }))
            .send()
            .await
            .map_err(|e| ChatAdapterError::Network(e.to_string()))?;
        let parsed: TelegramResponse<TelegramMessage> =
            resp.json().await.map_err(|e| ChatAdapterError::Network(e.to_string()))?;
        let poll = parsed.result.and_then(|m| m.poll).ok_or_else(|| {
            ChatAdapterError::Network("sendPoll response missing poll".to_string())
        })?;
        Ok(poll.id)
    }

    async fn send_document(
        &self,
        chat_id: &ChatId,
        filename: &str,
        bytes: &[u8],
    ) -> Result<(), ChatAdapterError> {
        let part = reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .text("chat_id", chat_id.native_id().to_string())
            .part("document", part);
        self.http
            .post(self.method_url("sendDocument"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ChatAdapterError::Network(e.to_string()))?;
        Ok(())
    }

    async fn set_typing(&self, chat_id: &ChatId, on: bool) -> Result<(), ChatAdapterError> {
        if !on {
            return Ok(());
        }
        self.http
            .post(self.method_url("sendChatAction"))
            .json(&json!({ "chat_id": chat_id.native_id(), "action": "typing" }))
            .send()
            .await
            .map_err(|e| ChatAdapterError::Network(e.to_string()))?;
        Ok(())
    }

    async fn validate_chat(&self, chat_id: &ChatId) -> Result<ChatSummary, ChatAdapterError> {
        let resp = self
            .http
            .get(self.method_url("getChat"))
            .query(&[("chat_id", chat_id.native_id())])
            .send()
            .await
            .map_err(|e| ChatAdapterError::Network(e.to_string()))?;
        let parsed: TelegramResponse<TelegramChat> =
            resp.json().await.map_err(|e| ChatAdapterError::Network(e.to_string()))?;
        if !parsed.ok {
            return Err(ChatAdapterError::DeadChat(chat_id.to_string()));
        }
        let chat = parsed.result.ok_or_else(|| ChatAdapterError::DeadChat(chat_id.to_string()))?;
        Ok(ChatSummary {
            chat_id: chat_id.clone(),
            title: chat.title.unwrap_or_else(|| chat_id.native_id().to_string()),
            is_group: chat.chat_type != "private",
        })
    }

    async fn upsert_status_board(
        &self,
        chat_id: &ChatId,
        board_key: &str,
        body: &str,
    ) -> Result<String, ChatAdapterError> {
        let key = (chat_id.clone(), board_key.to_string());
        let existing = self.board_messages.lock().await.get(&key).copied();

        let message_id = if let Some(message_id) = existing {
            self.http
                .post(self.method_url("editMessageText"))
                .json(&json!({ "chat_id": chat_id.native_id(), "message_id": message_id, "text": body }))
                .send()
                .await
                .map_err(|e| ChatAdapterError::Network(e.to_string()))?;
            message_id
        } else {
            let resp = self
                .http
                .post(self.method_url("sendMessage"))
                .json(&json!({ "chat_id": chat_id.native_id(), "text": body }))
                .send()
                .await
                .map_err(|e| ChatAdapterError::Network(e.to_string()))?;
            let parsed: TelegramResponse<TelegramMessage> =
                resp.json().await.map_err(|e| ChatAdapterError::Network(e.to_string()))?;
            let message_id = parsed
                .result
                .map(|m| m.message_id)
                .ok_or_else(|| ChatAdapterError::Network("sendMessage response missing id".to_string()))?;
            let _ = self
                .http
                .post(self.method_url("pinChatMessage"))
                .json(&json!({ "chat_id": chat_id.native_id(), "message_id": message_id }))
                .send()
                .await;
            message_id
        };

        self.board_messages.lock().await.insert(key, message_id);
        Ok(message_id.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct TelegramResponse<T> {
    ok: bool,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct TelegramUpdate {
    update_id: i64,
    #[serde(default)]
    message: Option<TelegramIncomingMessage>,
    #[serde(default)]
    poll_answer: Option<TelegramPollAnswer>,
}

#[derive(Debug, Deserialize)]
struct TelegramIncomingMessage {
    text: Option<String>,
    chat: TelegramChat,
    from: Option<TelegramUser>,
}

#[derive(Debug, Deserialize)]
struct TelegramMessage {
    message_id: i64,
    #[serde(default)]
    poll: Option<TelegramPoll>,
}

#[derive(Debug, Deserialize)]
struct TelegramPoll {
    id: String,
}

#[derive(Debug, Deserialize)]
struct TelegramChat {
    id: i64,
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "type")]
    chat_type: String,
}

#[derive(Debug, Deserialize)]
struct TelegramUser {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct TelegramPollAnswer {
    poll_id: String,
    user: TelegramUser,
    option_ids: Vec<usize>,
}

#[cfg(test)]
#[path = "telegram_longpoll_tests.rs"]
mod tests;
