// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request bodies for the control server's POST routes (spec §4.6).

use serde::{Deserialize, Serialize};
use touchgrass_core::{ChatId, RemoteControlAction, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub command: String,
    pub chat_id: ChatId,
    pub owner_user_id: UserId,
    pub cwd: String,
    #[serde(default)]
    pub existing_id: Option<String>,
    #[serde(default)]
    pub subscribed_groups: Vec<ChatId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindChatRequest {
    pub session_id: String,
    pub chat_id: ChatId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendInputRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitRequest {
    pub exit_code: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallEvent {
    pub tool_use_id: String,
    pub name: String,
    pub input: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResultEvent {
    pub tool_use_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub content: String,
    #[serde(default)]
    pub is_error: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalNeededEvent {
    pub name: String,
    pub input: serde_json::Value,
    pub prompt_text: String,
    #[serde(default)]
    pub poll_options: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionEvent {
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThinkingEvent {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantEvent {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingEvent {
    #[serde(default)]
    pub on: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundJobEvent {
    pub task_id: String,
    pub status: String,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub output_file: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub urls: Vec<String>,
}

/// Loosely-typed control request accepted by whichever endpoint enqueues
/// a control action; parsed with `touchgrass_core::parse_remote_control_action`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlRequest {
    pub action: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateCodeRequest {
    pub channel: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_round_trips_json() {
        let req = RegisterRequest {
            command: "claude --print".into(),
            chat_id: ChatId::new("telegram:1"),
            owner_user_id: UserId::new("telegram:1"),
            cwd: "/tmp".into(),
            existing_id: None,
            subscribed_groups: vec![],
        };
        let json = serde_json::to_string(&req).unwrap();
        let back: RegisterRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.command, req.command);
    }

    #[test]
    fn control_action_embedded_as_raw_json_value() {
        let req = ControlRequest { action: serde_json::json!("kill") };
        let action = touchgrass_core::parse_remote_control_action(&req.action);
        assert_eq!(action, Some(RemoteControlAction::Kill));
    }
}
