// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `status-boards.json` (spec §4.8): `{version, boards, jobs}`, written
//! debounced at 250 ms, mode 0600.

use crate::atomic_file::write_atomic_0600;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use touchgrass_core::{BackgroundJob, BackgroundJobStatus, StatusBoardEntry};

const CURRENT_VERSION: u32 = 1;
const DEBOUNCE: std::time::Duration = std::time::Duration::from_millis(250);

#[derive(Debug, Error)]
pub enum BoardStoreError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedBoards {
    pub version: u32,
    #[serde(default)]
    pub boards: Vec<StatusBoardEntry>,
    #[serde(default)]
    pub jobs: HashMap<String, Vec<BackgroundJob>>,
}

impl PersistedBoards {
    pub fn new() -> Self {
        Self { version: CURRENT_VERSION, boards: Vec::new(), jobs: HashMap::new() }
    }
}

pub fn load(path: &Path) -> Result<PersistedBoards, BoardStoreError> {
    if !path.exists() {
        return Ok(PersistedBoards::new());
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|source| BoardStoreError::Read { path: path.to_path_buf(), source })?;
    serde_json::from_str(&raw).map_err(|source| BoardStoreError::Parse { path: path.to_path_buf(), source })
}

fn save_now(path: &Path, state: &PersistedBoards) -> Result<(), BoardStoreError> {
    let json = serde_json::to_vec_pretty(state)
        .map_err(|source| BoardStoreError::Parse { path: path.to_path_buf(), source })?;
    write_atomic_0600(path, &json).map_err(|source| BoardStoreError::Write { path: path.to_path_buf(), source })
}

/// Debounces writes of [`PersistedBoards`] to disk: repeated calls to
/// [`BoardStore::schedule_save`] within 250 ms collapse into a single write
/// of the latest state.
pub struct BoardStore {
    path: PathBuf,
    pending: Arc<Mutex<Option<tokio::task::JoinHandle<()>>>>,
}

impl BoardStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path, pending: Arc::new(Mutex::new(None)) }
    }

    pub fn load(&self) -> Result<PersistedBoards, BoardStoreError> {
        load(&self.path)
    }

    /// Write immediately, bypassing the debounce window (used on daemon
    /// shutdown to guarantee the final state lands on disk).
    pub fn save_now(&self, state: &PersistedBoards) -> Result<(), BoardStoreError> {
        save_now(&self.path, state)
    }

    /// Schedule a debounced write. A call arriving before the previous
    /// timer fires cancels it and restarts the 250 ms window with the new
    /// state — only the most recent snapshot is ever written.
    pub async fn schedule_save(&self, state: PersistedBoards) {
        let path = self.path.clone();
        let mut pending = self.pending.lock().await;
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(DEBOUNCE).await;
            if let Err(err) = save_now(&path, &state) {
                tracing::warn!(path = %path.display(), error = %err, "failed to persist status boards");
            }
        }));
    }
}

#[cfg(test)]
#[path = "board_store_tests.rs"]
mod tests;
