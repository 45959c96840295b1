// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! touchgrass-parser: pure, I/O-free parsing of the three assistant JSONL
//! dialects into a single [`ParsedMessage`] shape.
//!
//! Dispatch is a discriminator lookup on the record's `type` field (and, for
//! dialect C, the nested `payload.type`). The only state carried across
//! calls is the bounded `tool_use_id → name` cache, which the caller owns
//! and threads through one session's stream of records.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod background_jobs;
mod dialect_a;
mod dialect_b;
mod dialect_c;
pub mod message;
pub mod tool_cache;

pub use message::{
    should_forward_tool_result, BackgroundJobEvent, ParsedMessage, ToolCall, ToolResult,
};
pub use tool_cache::ToolUseCache;

use serde_json::Value;

/// Parse one JSONL record, dispatching on its dialect. Unrecognized record
/// shapes yield an empty [`ParsedMessage`] rather than an error — a stream
/// may interleave records this parser has no opinion about.
pub fn parse_jsonl_message(record: &Value, cache: &mut ToolUseCache) -> ParsedMessage {
    let root = record.get("type").and_then(Value::as_str).unwrap_or_default();
    match root {
        "assistant" | "user" | "queue-operation" => dialect_a::parse(record, cache),
        "message" => dialect_b::parse(record, cache),
        "event_msg" | "response_item" => dialect_c::parse(record, cache),
        _ => ParsedMessage::default(),
    }
}
