// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dialect B: `message` root with `role` in `{assistant, toolResult}` and
//! typed blocks including `toolCall` (Pi's JSONL shape).

use crate::background_jobs::parse_tool_result_background_event;
use crate::message::{should_forward_tool_result, ParsedMessage, ToolCall, ToolResult};
use crate::tool_cache::ToolUseCache;
use serde_json::Value;

pub fn parse(record: &Value, cache: &mut ToolUseCache) -> ParsedMessage {
    let mut out = ParsedMessage::default();
    if record.get("type").and_then(Value::as_str) != Some("message") {
        return out;
    }
    let role = record.get("role").and_then(Value::as_str).unwrap_or_default();
    let blocks = record.get("content").and_then(Value::as_array).cloned().unwrap_or_default();

    match role {
        "assistant" => {
            for block in &blocks {
                match block.get("type").and_then(Value::as_str) {
                    Some("text") => {
                        if let Some(text) = block.get("text").and_then(Value::as_str) {
                            out.assistant_text.get_or_insert_with(String::new).push_str(text);
                        }
                    }
                    Some("thinking") => {
                        if let Some(text) = block.get("text").and_then(Value::as_str) {
                            out.thinking.get_or_insert_with(String::new).push_str(text);
                        }
                    }
                    Some("toolCall") => {
                        let id = block.get("id").and_then(Value::as_str).unwrap_or_default();
                        let name = block.get("name").and_then(Value::as_str).unwrap_or_default();
                        let input = block.get("arguments").cloned().unwrap_or(Value::Null);
                        let command = input.get("command").and_then(Value::as_str).map(str::to_string);
                        cache.remember(id, name, command);
                        out.tool_calls.push(ToolCall {
                            tool_use_id: id.to_string(),
                            name: name.to_string(),
                            input,
                        });
                    }
                    _ => {}
                }
            }
        }
        "toolResult" => {
            let id = record.get("toolCallId").and_then(Value::as_str).unwrap_or_default();
            let is_error = record.get("isError").and_then(Value::as_bool).unwrap_or(false);
            let content = record
                .get("content")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_default();
            let name = cache.lookup(id).map(str::to_string);
            let command = cache.lookup_command(id);

            if let Some(job) = parse_tool_result_background_event(&content, command) {
                out.background_job_events.push(job);
            }

            if should_forward_tool_result(name.as_deref(), &content, is_error) {
                out.tool_results.push(ToolResult { tool_use_id: id.to_string(), name, content, is_error });
            }
        }
        _ => {}
    }

    out
}

#[cfg(test)]
#[path = "dialect_b_tests.rs"]
mod tests;
