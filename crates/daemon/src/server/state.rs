// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use touchgrass_core::Config;
use touchgrass_storage::BoardStore;
use touchgrass_wire::ChatAdapter;

use crate::board_tracker::BoardTracker;
use crate::pairing::PairingCodes;
use crate::session_manager::SessionManager;

/// Shared state for every control-server handler.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub boards: Arc<BoardTracker>,
    pub board_store: Arc<BoardStore>,
    pub config: Arc<RwLock<Config>>,
    pub config_path: Arc<PathBuf>,
    pub pairing_codes: Arc<PairingCodes>,
    pub chat_adapter: Arc<dyn ChatAdapter>,
    pub auth_token: Arc<String>,
    pub started_at: u64,
    pub bot_name: Arc<String>,
    pub shutdown: Arc<tokio::sync::Notify>,
}

impl AppState {
    pub fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    pub fn persist_config(&self) {
        let guard = self.config.read();
        if let Err(err) = touchgrass_storage::save_config(&self.config_path, &guard) {
            tracing::warn!(error = %err, "failed to persist config");
        }
    }
}
