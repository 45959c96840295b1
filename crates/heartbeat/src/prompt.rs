// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The heartbeat prompt text format (spec §4.5).

/// `timestamp` is whatever local-time rendering the caller wants embedded
/// verbatim (the clock abstraction lives in `touchgrass_core`, not here).
pub fn format_heartbeat_prompt(workflow: &str, timestamp: &str, context: &str) -> String {
    format!(
        "❤ Heartbeat workflow trigger. The current time and date is: {timestamp}.\nWorkflow: {workflow}. Follow these instructions now if time and date is relevant:\n\n{context}\n\n❤"
    )
}

/// Concatenation rule for a due workflow: block textContent + blank line +
/// workflow file contents (scenario #4).
pub fn build_context(block_text: &str, workflow_text: &str) -> String {
    if block_text.is_empty() {
        workflow_text.to_string()
    } else {
        format!("{block_text}\n\n{workflow_text}")
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
