// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dialect C: `event_msg`/`response_item` roots with a payload discriminator
//! (Codex's JSONL shape). `agent_message` → assistantText, `agent_reasoning`
//! → thinking, `function_call`/`custom_tool_call` → toolCall,
//! `function_call_output`/`custom_tool_call_output` → toolResult.

use crate::background_jobs::parse_tool_result_background_event;
use crate::message::{should_forward_tool_result, ParsedMessage, ToolCall, ToolResult};
use crate::tool_cache::ToolUseCache;
use serde_json::Value;

pub fn parse(record: &Value, cache: &mut ToolUseCache) -> ParsedMessage {
    let mut out = ParsedMessage::default();
    let root = record.get("type").and_then(Value::as_str).unwrap_or_default();
    if root != "event_msg" && root != "response_item" {
        return out;
    }

    let payload = record.get("payload").unwrap_or(record);
    let kind = payload.get("type").and_then(Value::as_str).unwrap_or_default();

    match kind {
        "agent_message" => {
            if let Some(text) = payload.get("message").and_then(Value::as_str) {
                out.assistant_text = Some(text.to_string());
            }
        }
        "agent_reasoning" => {
            if let Some(text) = payload.get("text").and_then(Value::as_str) {
                out.thinking = Some(text.to_string());
            }
        }
        "function_call" | "custom_tool_call" => {
            let id = payload.get("call_id").and_then(Value::as_str).unwrap_or_default();
            let name = payload.get("name").and_then(Value::as_str).unwrap_or_default();
            let input = payload.get("arguments").cloned().unwrap_or(Value::Null);
            let command = input.get("command").and_then(Value::as_str).map(str::to_string);
            cache.remember(id, name, command);
            out.tool_calls.push(ToolCall { tool_use_id: id.to_string(), name: name.to_string(), input });
        }
        "function_call_output" | "custom_tool_call_output" => {
            let id = payload.get("call_id").and_then(Value::as_str).unwrap_or_default();
            let is_error = payload.get("is_error").and_then(Value::as_bool).unwrap_or(false);
            let content = payload
                .get("output")
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
#[path = "dialect_c_tests.rs"]
mod tests;
