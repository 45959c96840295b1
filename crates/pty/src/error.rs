// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for PTY spawn and I/O.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PtyError {
    #[error("failed to open pty: {0}")]
    Open(String),

    #[error("failed to spawn '{command}': {source}")]
    Spawn { command: String, source: std::io::Error },

    #[error("failed to resize pty: {0}")]
    Resize(String),

    #[error("failed to write to pty: {0}")]
    Write(String),

    #[error("pty session already exited")]
    AlreadyExited,
}
