// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parses the `<agent-heartbeat interval="NN">...</agent-heartbeat>` block
//! out of `AGENTS.md` and its `<run workflow="name" .../>` child tags.

use crate::trigger::Trigger;
use regex::Regex;
use std::sync::OnceLock;

const DEFAULT_INTERVAL_MINUTES: u32 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRule {
    pub workflow: String,
    pub trigger: Trigger,
    pub on: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatBlock {
    pub interval_minutes: u32,
    pub text: String,
    pub runs: Vec<RunRule>,
}

fn block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<agent-heartbeat([^>]*)>(.*?)</agent-heartbeat>"#)
            .expect("static block pattern is valid regex")
    })
}

fn run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<run\s+([^>]*?)/?>"#).expect("static run pattern is valid regex")
    })
}

fn comment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("static comment pattern is valid regex"))
}

fn attr_regex(name: &str) -> Regex {
    Regex::new(&format!(r#"{name}\s*=\s*"([^"]*)""#)).expect("static attr pattern is valid regex")
}

fn attr(attrs: &str, name: &str) -> Option<String> {
    attr_regex(name).captures(attrs).map(|c| c[1].to_string())
}

/// Parse the first `<agent-heartbeat>` block found in `agents_md`. Returns
/// `None` if no block is present.
pub fn parse_heartbeat_block(agents_md: &str) -> Option<HeartbeatBlock> {
    let caps = block_regex().captures(agents_md)?;
    let block_attrs = &caps[1];
    let body = &caps[2];

    let interval_minutes = attr(block_attrs, "interval")
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_INTERVAL_MINUTES);

    let runs: Vec<RunRule> = run_regex()
        .captures_iter(body)
        .filter_map(|c| {
            let attrs = c[1].to_string();
            let workflow = attr(&attrs, "workflow")?;
            let trigger = Trigger::from_attrs(&attrs);
            let on = attr(&attrs, "on");
            Some(RunRule { workflow, trigger, on })
        })
        .collect();

    let without_runs = run_regex().replace_all(body, "");
    let text = comment_regex().replace_all(&without_runs, "").trim().to_string();

    Some(HeartbeatBlock { interval_minutes, text, runs })
}

#[cfg(test)]
#[path = "block_tests.rs"]
mod tests;
