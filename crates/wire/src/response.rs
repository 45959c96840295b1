// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Response bodies for the control server's routes (spec §4.6).

use serde::{Deserialize, Serialize};
use touchgrass_core::ChatId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub pid: u32,
    pub started_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub command: String,
    pub state: String,
    pub created_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub pid: u32,
    pub uptime: u64,
    pub sessions: Vec<SessionSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub chat_id: ChatId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub busy: bool,
    #[serde(default)]
    pub busy_label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub session_id: String,
    pub dm_busy: bool,
    pub linked_groups: Vec<ChatId>,
    pub all_linked_groups: Vec<ChatId>,
}

/// Response to `GET /remote/:id/input`. `unknown: true` means the CLI must
/// re-register — the daemon has no record of this session anymore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputResponse {
    #[serde(default)]
    pub unknown: bool,
    #[serde(default)]
    pub input: Vec<String>,
    #[serde(default)]
    pub control: Option<serde_json::Value>,
}

impl InputResponse {
    pub fn unknown() -> Self {
        Self { unknown: true, input: Vec::new(), control: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribedGroupsResponse {
    pub chat_ids: Vec<ChatId>,
    pub bound_chat: Option<ChatId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl Default for OkResponse {
    fn default() -> Self {
        Self { ok: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateCodeResponse {
    pub code: String,
    pub expires_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_input_response_has_empty_payload() {
        let resp = InputResponse::unknown();
        assert!(resp.unknown);
        assert!(resp.input.is_empty());
        assert!(resp.control.is_none());
    }

    #[test]
    fn ok_response_serializes_true() {
        let json = serde_json::to_value(OkResponse::default()).unwrap();
        assert_eq!(json["ok"], true);
    }
}
