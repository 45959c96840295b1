// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Approval-prompt detection (§4.4.1): scan the ANSI-stripped PTY ring for
//! a vendor's prompt/option phrase pair, then extract the prompt sentence
//! and the numbered choices.

use crate::ansi::strip_ansi_escapes;
use crate::vendor::Vendor;

/// Tools whose approval prompt sets `lastToolCall` attribution on the
/// extracted [`ApprovalPrompt`].
pub const ATTRIBUTION_ALLOWLIST: &[&str] = &["Bash", "Edit", "Write", "NotebookEdit"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalPrompt {
    pub prompt_text: String,
    pub poll_options: Vec<String>,
}

/// Scan `ring` (raw PTY bytes as text) for `vendor`'s approval prompt.
/// Returns `None` if the vendor has no in-terminal approval flow, or if
/// the ring doesn't currently contain both the prompt and option phrases.
pub fn detect_approval_prompt(ring: &str, vendor: Vendor) -> Option<ApprovalPrompt> {
    let (prompt_phrase, option_phrase) = vendor.approval_phrases()?;
    let clean = strip_ansi_escapes(ring);

    let prompt_start = clean.find(prompt_phrase)?;
    clean[prompt_start..].find(option_phrase)?;

    let question_end = clean[prompt_start..].find('?').map(|i| prompt_start + i + 1)?;
    let prompt_text = clean[prompt_start..question_end].trim().to_string();

    let options = parse_numbered_options(&clean[question_end..]);
    if options.is_empty() {
        return None;
    }

    Some(ApprovalPrompt { prompt_text, poll_options: options })
}

fn parse_numbered_options(s: &str) -> Vec<String> {
    let mut options = Vec::new();
    let mut n = 1u32;
    let mut search_start = 0usize;

    loop {
        let marker = format!("{n}. ");
        let Some(rel_idx) = s[search_start..].find(&marker) else { break };
        let idx = search_start + rel_idx;

        let boundary_ok =
            idx == 0 || s[..idx].chars().next_back().map(char::is_whitespace).unwrap_or(true);
        if !boundary_ok {
            search_start = idx + marker.len();
            continue;
        }

        let content_start = idx + marker.len();
        let next_marker = format!("{}. ", n + 1);
        let content_end =
            s[content_start..].find(&next_marker).map(|i| content_start + i).unwrap_or(s.len());

        options.push(strip_keyboard_hint(s[content_start..content_end].trim()));
        search_start = content_end;
        n += 1;
    }

    options
}

/// Drop a trailing keystroke hint ("Esc to cancel") or parenthetical
/// ("(esc)") from an option's label text.
fn strip_keyboard_hint(option: &str) -> String {
    let lower = option.to_lowercase();
    if let Some(hint_idx) = lower.find("esc to cancel") {
        if let Some(comma_idx) = option[..hint_idx].rfind(',') {
            return option[..comma_idx].trim().to_string();
        }
    }

    let trimmed = option.trim_end();
    if trimmed.ends_with(')') {
        if let Some(open_idx) = trimmed.rfind('(') {
            return trimmed[..open_idx].trim_end().to_string();
        }
    }

    option.trim().to_string()
}

#[cfg(test)]
#[path = "approval_tests.rs"]
mod tests;
