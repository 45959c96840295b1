// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Poll/picker state: short-lived selection widgets created by the chat
//! adapter and tracked by the Session Manager until answered or cancelled.

use crate::id::SessionId;
use crate::namespace::{ChatId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickerKind {
    Question,
    ResumeFile,
    ResumeSession,
    OutputMode,
}

/// A live picker/poll, keyed by `poll_id` in the Session Manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerState {
    pub poll_id: String,
    pub session_id: SessionId,
    pub chat_id: ChatId,
    pub owner_user_id: UserId,
    pub kind: PickerKind,
    pub options: Vec<String>,
    /// Offset of the first option on the current page.
    pub offset: usize,
    pub page_size: usize,
    /// Accumulated toggle selections for a file picker.
    #[serde(default)]
    pub selected_mentions: Vec<String>,
}

impl PickerState {
    pub fn new(
        poll_id: impl Into<String>,
        session_id: SessionId,
        chat_id: ChatId,
        owner_user_id: UserId,
        kind: PickerKind,
        options: Vec<String>,
        page_size: usize,
    ) -> Self {
        Self {
            poll_id: poll_id.into(),
            session_id,
            chat_id,
            owner_user_id,
            kind,
            options,
            offset: 0,
            page_size,
            selected_mentions: Vec::new(),
        }
    }

    /// True when there are more options beyond the current page — i.e. a
    /// trailing "More" slot should be shown.
    pub fn has_more(&self) -> bool {
        self.offset + self.page_size < self.options.len()
    }

    /// The offset the next page should start at when "More" is chosen.
    /// The "More" slot itself consumes one page slot.
    pub fn next_offset(&self) -> usize {
        self.offset + self.page_size - 1
    }

    pub fn current_page(&self) -> &[String] {
        let end = (self.offset + self.page_size).min(self.options.len());
        &self.options[self.offset.min(self.options.len())..end]
    }

    pub fn toggle_mention(&mut self, mention: &str) {
        if let Some(pos) = self.selected_mentions.iter().position(|m| m == mention) {
            self.selected_mentions.remove(pos);
        } else {
            self.selected_mentions.push(mention.to_string());
        }
    }

    pub fn clear_mentions(&mut self) {
        self.selected_mentions.clear();
    }
}

#[cfg(test)]
#[path = "picker_tests.rs"]
mod tests;
