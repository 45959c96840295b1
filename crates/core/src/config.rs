// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The on-disk config file shape (spec §6): per-channel pairing and linked
//! groups, plus per-chat preferences. Loading/saving lives in
//! `touchgrass-storage`; this module only owns the shape and defaults.

use crate::namespace::{ChatId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairedUser {
    pub user_id: UserId,
    pub paired_at: u64,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedGroup {
    pub chat_id: ChatId,
    #[serde(default)]
    pub title: Option<String>,
    pub linked_at: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Compact,
    Verbose,
}

/// Per-chat preference overrides. Fields are `None`/absent by default and
/// are never persisted when unset — defaults live in code, not on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatPreference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_mode: Option<OutputMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,
}

impl ChatPreference {
    pub fn output_mode_or_default(&self) -> OutputMode {
        self.output_mode.unwrap_or(OutputMode::Compact)
    }

    pub fn thinking_or_default(&self) -> bool {
        self.thinking.unwrap_or(false)
    }

    pub fn muted_or_default(&self) -> bool {
        self.muted.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelConfig {
    #[serde(rename = "type")]
    pub channel_type: String,
    #[serde(default)]
    pub credentials: HashMap<String, String>,
    #[serde(default)]
    pub paired_users: Vec<PairedUser>,
    #[serde(default)]
    pub linked_groups: Vec<LinkedGroup>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_output_batch_min_ms")]
    pub output_batch_min_ms: u64,
    #[serde(default = "default_output_batch_max_ms")]
    pub output_batch_max_ms: u64,
    #[serde(default = "default_output_buffer_max_chars")]
    pub output_buffer_max_chars: usize,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    #[serde(default)]
    pub default_shell: Option<String>,
}

fn default_output_batch_min_ms() -> u64 {
    400
}
fn default_output_batch_max_ms() -> u64 {
    2_000
}
fn default_output_buffer_max_chars() -> usize {
    3_500
}
fn default_max_sessions() -> usize {
    16
}

impl Settings {
    pub fn new_default() -> Self {
        Self {
            output_batch_min_ms: default_output_batch_min_ms(),
            output_batch_max_ms: default_output_batch_max_ms(),
            output_buffer_max_chars: default_output_buffer_max_chars(),
            max_sessions: default_max_sessions(),
            default_shell: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub channels: HashMap<String, ChannelConfig>,
    #[serde(default = "Settings::new_default")]
    pub settings: Settings,
    #[serde(default)]
    pub chat_preferences: HashMap<ChatId, ChatPreference>,
}

impl Config {
    pub fn is_paired(&self, user_id: &UserId) -> bool {
        self.channels.values().any(|c| c.paired_users.iter().any(|p| &p.user_id == user_id))
    }

    pub fn is_linked(&self, chat_id: &ChatId) -> bool {
        self.channels.values().any(|c| c.linked_groups.iter().any(|g| &g.chat_id == chat_id))
    }

    pub fn preference(&self, chat_id: &ChatId) -> ChatPreference {
        self.chat_preferences.get(chat_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
