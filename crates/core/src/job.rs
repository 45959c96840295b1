// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background job: an assistant-initiated long-running command whose
//! lifecycle the daemon tracks independently of the foreground turn.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundJobStatus {
    Running,
    Completed,
    Failed,
    Killed,
}

impl BackgroundJobStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundJob {
    pub task_id: String,
    pub status: BackgroundJobStatus,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub output_file: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub urls: Vec<String>,
    pub updated_at: u64,
}

impl BackgroundJob {
    pub fn new(task_id: impl Into<String>, status: BackgroundJobStatus, updated_at: u64) -> Self {
        Self {
            task_id: task_id.into(),
            status,
            command: None,
            output_file: None,
            summary: None,
            urls: Vec::new(),
            updated_at,
        }
    }
}
