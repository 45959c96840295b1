// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background-job event extraction (spec §4.3): the `<task-notification>`
//! XML-like fragment carried on a `queue-operation` record, and the
//! "Command running in background with ID: ..." / "Successfully stopped
//! task: ..." phrases embedded in ordinary `tool_result` text.

use crate::message::BackgroundJobEvent;
use regex::Regex;
use std::sync::OnceLock;

fn tag_regex(tag: &str) -> Regex {
    Regex::new(&format!(r"(?s)<{tag}>(.*?)</{tag}>")).expect("static tag pattern is valid regex")
}

fn capture_tag(fragment: &str, tag: &str) -> Option<String> {
    tag_regex(tag).captures(fragment).map(|c| c[1].trim().to_string())
}

/// Parse a `<task-notification>...</task-notification>` XML-like fragment
/// into a [`BackgroundJobEvent`]. Returns `None` if `<task-id>` is missing.
pub fn parse_task_notification(fragment: &str) -> Option<BackgroundJobEvent> {
    let task_id = capture_tag(fragment, "task-id")?;
    let status = capture_tag(fragment, "status").unwrap_or_else(|| "unknown".to_string());
    let summary = capture_tag(fragment, "summary");
    let output_file = capture_tag(fragment, "output-file");
    let urls = harvest_urls(fragment);
    Some(BackgroundJobEvent { task_id, status, command: None, output_file, summary, urls })
}

fn running_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Command running in background with ID:\s*(\S+?)\.?\s*(?:Output is being written to:\s*(\S+))?")
            .expect("static regex is valid")
    })
}

fn stopped_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Successfully stopped task:\s*(\S+)").expect("static regex is valid")
    })
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://[^\s]+").expect("static regex is valid"))
}

pub fn harvest_urls(text: &str) -> Vec<String> {
    url_regex().find_iter(text).map(|m| m.as_str().trim_end_matches(['.', ',']).to_string()).collect()
}

/// Extract a background-job event from `tool_result` content, when it
/// matches one of the two recognized phrases. `command`, if known from the
/// originating `tool_use`, is carried through.
pub fn parse_tool_result_background_event(
    content: &str,
    command: Option<&str>,
) -> Option<BackgroundJobEvent> {
    if let Some(caps) = running_regex().captures(content) {
        let task_id = caps.get(1)?.as_str().to_string();
        let output_file = caps.get(2).map(|m| m.as_str().to_string());
        return Some(BackgroundJobEvent {
            task_id,
            status: "running".to_string(),
            command: command.map(str::to_string),
            output_file,
            summary: None,
            urls: harvest_urls(content),
        });
    }
    if let Some(caps) = stopped_regex().captures(content) {
        let task_id = caps.get(1)?.as_str().to_string();
        return Some(BackgroundJobEvent {
            task_id,
            status: "stopped".to_string(),
            command: command.map(str::to_string),
            output_file: None,
            summary: None,
            urls: Vec::new(),
        });
    }
    None
}

#[cfg(test)]
#[path = "background_jobs_tests.rs"]
mod tests;
