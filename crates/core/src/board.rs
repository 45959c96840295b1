// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status board: an idempotent pinned message per `(chat_id, board_key)`
//! showing a live summary of running background jobs.

use crate::namespace::ChatId;
use serde::{Deserialize, Serialize};

/// Jobs beyond this count are summarized as "+N more" in the board body.
pub const MAX_LISTED_JOBS: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusBoardEntry {
    pub chat_id: ChatId,
    pub board_key: String,
    pub message_id: Option<String>,
    pub pinned: bool,
    pub updated_at: u64,
}

impl StatusBoardEntry {
    pub fn new(chat_id: ChatId, board_key: impl Into<String>, updated_at: u64) -> Self {
        Self { chat_id, board_key: board_key.into(), message_id: None, pinned: false, updated_at }
    }

    pub fn is_orphaned(&self, now_ms: u64, max_age_ms: u64) -> bool {
        self.message_id.is_none() && now_ms.saturating_sub(self.updated_at) > max_age_ms
    }
}

/// Render a board body line for a set of job summaries, capping the
/// listing at [`MAX_LISTED_JOBS`] with a trailing "+N more" suffix.
pub fn render_board_body(job_summaries: &[String]) -> String {
    if job_summaries.is_empty() {
        return "No background jobs running.".to_string();
    }
    let shown = job_summaries.iter().take(MAX_LISTED_JOBS).cloned().collect::<Vec<_>>().join("\n");
    if job_summaries.len() > MAX_LISTED_JOBS {
        format!("{shown}\n+{} more", job_summaries.len() - MAX_LISTED_JOBS)
    } else {
        shown
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
