// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The unified event model every vendor dialect collapses into.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool_use_id: String,
    pub name: String,
    pub input: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_use_id: String,
    pub name: Option<String>,
    pub content: String,
    pub is_error: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundJobEvent {
    pub task_id: String,
    pub status: String,
    pub command: Option<String>,
    pub output_file: Option<String>,
    pub summary: Option<String>,
    pub urls: Vec<String>,
}

/// Allowlist of tool names whose results are forwarded to chat (spec §4.3).
pub const FORWARDED_TOOL_RESULT_NAMES: &[&str] =
    &["WebFetch", "WebSearch", "Bash", "bash", "exec_command"];

/// The phrase a user-rejected tool use carries; errors with this exact text
/// are never forwarded even though they're errors.
pub const USER_REJECTION_PHRASE: &str = "The user doesn't want to proceed with this tool use";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_results: Vec<ToolResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub background_job_events: Vec<BackgroundJobEvent>,
}

impl ParsedMessage {
    pub fn is_empty(&self) -> bool {
        self.assistant_text.is_none()
            && self.thinking.is_none()
            && self.questions.is_empty()
            && self.tool_calls.is_empty()
            && self.tool_results.is_empty()
            && self.background_job_events.is_empty()
    }
}

/// Should a tool result be forwarded to chat? Allowlisted tool names always
/// forward; any error that isn't the user-rejection phrase also forwards.
pub fn should_forward_tool_result(name: Option<&str>, content: &str, is_error: bool) -> bool {
    if is_error {
        return content != USER_REJECTION_PHRASE;
    }
    matches!(name, Some(n) if FORWARDED_TOOL_RESULT_NAMES.contains(&n))
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
