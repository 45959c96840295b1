// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised while talking to the daemon's control server.

use crate::exit_error::ExitError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("touchgrass daemon is not running")]
    DaemonNotRunning,

    #[error("could not reach touchgrass daemon: {0}")]
    Connect(#[source] std::io::Error),

    #[error("timed out waiting for touchgrass daemon")]
    Timeout,

    #[error("daemon returned malformed response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("{error} (status {status})")]
    Api { status: u16, error: String },

    #[error("unexpected response status {0}")]
    UnexpectedStatus(u16),
}

impl From<ClientError> for ExitError {
    fn from(err: ClientError) -> Self {
        let message = err.to_string();
        ExitError::new(1, message)
    }
}

#[cfg(test)]
#[path = "client_error_tests.rs"]
mod tests;
