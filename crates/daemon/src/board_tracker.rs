// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background-job tracker and status board (spec §4.8): a per-session
//! `taskId → BackgroundJob` map, one-time started/terminal announcements,
//! and the idempotent pinned status-board body, backed by
//! `touchgrass_storage::BoardStore`'s debounced persistence.

use std::collections::HashMap;

use parking_lot::Mutex;
use touchgrass_core::{BackgroundJob, BackgroundJobStatus, ChatId, SessionId, StatusBoardEntry};
use touchgrass_storage::{BoardStore, PersistedBoards};

/// Board reconciliation clears a pinned message that's been unpinned
/// (no `message_id`) and idle for this long.
pub const ORPHAN_MAX_AGE_MS: u64 = 5 * 60 * 1000;

pub enum JobEventOutcome {
    /// First time this task id has been seen running: announce "started".
    Started(BackgroundJob),
    /// An already-running job's fields changed; no new announcement.
    Updated(BackgroundJob),
    /// The job reached a terminal state and was removed: announce once.
    Terminal(BackgroundJob),
}

struct State {
    jobs: HashMap<SessionId, HashMap<String, BackgroundJob>>,
    boards: HashMap<(ChatId, String), StatusBoardEntry>,
}

pub struct BoardTracker {
    state: Mutex<State>,
}

impl BoardTracker {
    pub fn new() -> Self {
        Self { state: Mutex::new(State { jobs: HashMap::new(), boards: HashMap::new() }) }
    }

    /// Apply one `BackgroundJob` update, returning what announcement (if
    /// any) the caller should send.
    pub fn record_job_event(&self, session_id: SessionId, job: BackgroundJob) -> JobEventOutcome {
        let mut g = self.state.lock();
        let session_jobs = g.jobs.entry(session_id).or_default();

        if job.status.is_terminal() {
            let removed = session_jobs.remove(&job.task_id);
            return JobEventOutcome::Terminal(removed.unwrap_or(job));
        }

        match session_jobs.insert(job.task_id.clone(), job.clone()) {
            None => JobEventOutcome::Started(job),
            Some(_) => JobEventOutcome::Updated(job),
        }
    }

    /// Re-derive the board body for a session from its currently running
    /// jobs, in insertion order truncated by `render_board_body`.
    pub fn running_job_summaries(&self, session_id: &SessionId) -> Vec<String> {
        let g = self.state.lock();
        match g.jobs.get(session_id) {
            Some(jobs) => jobs.values().map(summarize).collect(),
            None => Vec::new(),
        }
    }

    pub fn jobs_for_session(&self, session_id: &SessionId) -> Vec<BackgroundJob> {
        self.state.lock().jobs.get(session_id).map(|j| j.values().cloned().collect()).unwrap_or_default()
    }

    /// Record a board as upserted for `(chat_id, board_key)`, idempotently
    /// creating or refreshing the entry.
    pub fn upsert_board(
        &self,
        chat_id: ChatId,
        board_key: impl Into<String>,
        message_id: String,
        now_ms: u64,
    ) {
        let board_key = board_key.into();
        let mut g = self.state.lock();
        let entry = g
            .boards
            .entry((chat_id.clone(), board_key.clone()))
            .or_insert_with(|| StatusBoardEntry::new(chat_id, board_key, now_ms));
        entry.message_id = Some(message_id);
        entry.pinned = true;
        entry.updated_at = now_ms;
    }

    /// Record that a board send/pin is in flight, without yet knowing the
    /// adapter-assigned message id. If the send never completes, this
    /// entry ages into [`orphaned_boards`].
    pub fn begin_board_attempt(&self, chat_id: ChatId, board_key: impl Into<String>, now_ms: u64) {
        let board_key = board_key.into();
        let mut g = self.state.lock();
        g.boards
            .entry((chat_id.clone(), board_key.clone()))
            .or_insert_with(|| StatusBoardEntry::new(chat_id, board_key, now_ms));
    }

    pub fn clear_board(&self, chat_id: &ChatId, board_key: &str) -> Option<StatusBoardEntry> {
        self.state.lock().boards.remove(&(chat_id.clone(), board_key.to_string()))
    }

    /// Boards unpinned and idle longer than [`ORPHAN_MAX_AGE_MS`]: these
    /// should be cleared by the 30 s reconciliation loop.
    pub fn orphaned_boards(&self, now_ms: u64) -> Vec<(ChatId, String)> {
        self.state
            .lock()
            .boards
            .values()
            .filter(|b| b.is_orphaned(now_ms, ORPHAN_MAX_AGE_MS))
            .map(|b| (b.chat_id.clone(), b.board_key.clone()))
            .collect()
    }

    /// Drop every job and board tracked for a session (cascade on removal).
    pub fn drop_session(&self, session_id: &SessionId) {
        let mut g = self.state.lock();
        g.jobs.remove(session_id);
    }

    /// Re-read a session's vendor JSONL and feed every background-job
    /// event found back through [`record_job_event`], the same path a
    /// live `background_job` POST takes. This catches a terminal event
    /// whose POST never arrived (spec §4.8) — without it, a job the CLI
    /// failed to report as finished shows "running" forever.
    pub fn reconcile_from_jsonl(
        &self,
        session_id: SessionId,
        lines: impl Iterator<Item = String>,
    ) -> Vec<JobEventOutcome> {
        let mut cache = touchgrass_parser::ToolUseCache::new();
        let now_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let mut outcomes = Vec::new();
        for line in lines {
            let Ok(record) = serde_json::from_str::<serde_json::Value>(&line) else { continue };
            let parsed = touchgrass_parser::parse_jsonl_message(&record, &mut cache);
            for event in parsed.background_job_events {
                outcomes.push(self.record_job_event(session_id, background_job_from_event(event, now_ms)));
            }
        }
        outcomes
    }

    /// Snapshot the in-memory state into the persisted shape and schedule
    /// a debounced write (spec §4.8: 250 ms, mode 0600).
    pub async fn persist(&self, store: &BoardStore) -> Result<(), touchgrass_storage::BoardStoreError> {
        let snapshot = {
            let g = self.state.lock();
            let mut persisted = PersistedBoards::new();
            persisted.boards = g.boards.values().cloned().collect();
            for (session_id, jobs) in &g.jobs {
                persisted.jobs.insert(session_id.to_string(), jobs.values().cloned().collect());
            }
            persisted
        };
        store.schedule_save(snapshot).await;
        Ok(())
    }
}

impl Default for BoardTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn background_job_from_event(event: touchgrass_parser::BackgroundJobEvent, now_ms: u64) -> BackgroundJob {
    let status = match event.status.as_str() {
        "completed" => BackgroundJobStatus::Completed,
        "failed" => BackgroundJobStatus::Failed,
        "killed" => BackgroundJobStatus::Killed,
        _ => BackgroundJobStatus::Running,
    };
    let mut job = BackgroundJob::new(event.task_id, status, now_ms);
    job.command = event.command;
    job.output_file = event.output_file;
    job.summary = event.summary;
    job.urls = event.urls;
    job
}

fn summarize(job: &BackgroundJob) -> String {
    match (&job.command, job.status) {
        (Some(command), BackgroundJobStatus::Running) => format!("{} — {command}", job.task_id),
        _ => job.task_id.clone(),
    }
}

#[cfg(test)]
#[path = "board_tracker_tests.rs"]
mod tests;
