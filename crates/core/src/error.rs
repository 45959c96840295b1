// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared error taxonomy for the core data model.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown session: {0}")]
    UnknownSession(String),

    #[error("session ref contains shell-unsafe characters: {0:?}")]
    UnsafeSessionRef(String),

    #[error("chat {chat} is already attached to a different session")]
    ChatAlreadyAttached { chat: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
