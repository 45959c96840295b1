// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dialect A: `assistant`/`user` roots with typed content blocks
//! `text | thinking | tool_use | tool_result` (Claude Code's JSONL shape).

use crate::background_jobs::parse_tool_result_background_event;
use crate::message::{should_forward_tool_result, ParsedMessage, ToolCall, ToolResult};
use crate::tool_cache::ToolUseCache;
use serde_json::Value;

const ASK_USER_QUESTION: &str = "AskUserQuestion";

/// Parse a single Dialect A record. `cache` is mutated: `tool_use` blocks
/// record their id→name mapping for later `tool_result` lookups.
pub fn parse(record: &Value, cache: &mut ToolUseCache) -> ParsedMessage {
    let mut out = ParsedMessage::default();
    let root = record.get("type").and_then(Value::as_str).unwrap_or_default();

    if root == "queue-operation" {
        if let Some(fragment) = record.get("content").and_then(Value::as_str) {
            if let Some(job) = crate::background_jobs::parse_task_notification(fragment) {
                out.background_job_events.push(job);
            }
        }
        return out;
    }

    if root != "assistant" && root != "user" {
        return out;
    }

    let blocks = record
        .pointer("/message/content")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    for block in &blocks {
        match block.get("type").and_then(Value::as_str) {
            Some("text") => {
                if let Some(text) = block.get("text").and_then(Value::as_str) {
                    append_text(&mut out.assistant_text, text);
                }
            }
            Some("thinking") => {
                if let Some(text) = block.get("thinking").and_then(Value::as_str) {
                    append_text(&mut out.thinking, text);
                }
            }
            Some("tool_use") => {
                let name = block.get("name").and_then(Value::as_str).unwrap_or_default();
                let id = block.get("id").and_then(Value::as_str).unwrap_or_default();
                let input = block.get("input").cloned().unwrap_or(Value::Null);

                if name == ASK_USER_QUESTION {
                    if let Some(question) = input.get("question").and_then(Value::as_str) {
                        out.questions.push(question.to_string());
                    }
                } else {
                    let command = input.get("command").and_then(Value::as_str).map(str::to_string);
                    cache.remember(id, name, command);
                    out.tool_calls.push(ToolCall {
                        tool_use_id: id.to_string(),
                        name: name.to_string(),
                        input,
                    });
                }
            }
            Some("tool_result") => {
                let id = block.get("tool_use_id").and_then(Value::as_str).unwrap_or_default();
                let is_error = block.get("is_error").and_then(Value::as_bool).unwrap_or(false);
                let content = extract_result_content(block);
                let name = cache.lookup(id).map(str::to_string);
                let command = cache.lookup_command(id);

                if let Some(job) = parse_tool_result_background_event(&content, command) {
                    out.background_job_events.push(job);
                }

                if should_forward_tool_result(name.as_deref(), &content, is_error) {
                    out.tool_results.push(ToolResult {
                        tool_use_id: id.to_string(),
                        name,
                        content,
                        is_error,
                    });
                }
            }
            _ => {}
        }
    }

    out
}

fn append_text(slot: &mut Option<String>, text: &str) {
    match slot {
        Some(existing) => {
            existing.push('\n');
            existing.push_str(text);
        }
        None => *slot = Some(text.to_string()),
    }
}

/// `tool_result` content is either a bare string or a list of `text` blocks.
fn extract_result_content(block: &Value) -> String {
    match block.get("content") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
#[path = "dialect_a_tests.rs"]
mod tests;
