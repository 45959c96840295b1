// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queued-input draining and poll-keystroke replay (spec §4.4.3): every
//! 200 ms, pull queued text/control tokens from the daemon and translate
//! each into the bytes the PTY writer should send.

use std::time::Duration;

use touchgrass_adapters::{bracketed_paste, is_upload_path, parse_poll_token, replay_keystrokes, Keystroke};

use crate::ensure_daemon::Daemon;

pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);
const UPLOAD_SETTLE_DELAY: Duration = Duration::from_millis(1500);

fn keystroke_bytes(key: Keystroke) -> &'static [u8] {
    match key {
        Keystroke::Down => b"\x1b[B",
        Keystroke::Enter => b"\r",
    }
}

/// What the PTY writer task should do with one queued-input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PtyWrite {
    /// Send these bytes immediately, with nothing queued after them.
    Bytes(Vec<u8>),
    /// Send `first`, wait `delay`, then send `then` — used for upload
    /// paths, which need time for the assistant to load the attachment
    /// before Enter submits it.
    Delayed { first: Vec<u8>, delay: Duration, then: Vec<u8> },
}

/// Translate one queued-input string (ordinary text or a `\x1b[POLL...]`
/// control token) into the bytes the PTY writer sends.
pub fn plan_input(raw: &str) -> PtyWrite {
    if let Some(token) = parse_poll_token(raw) {
        let mut bytes = Vec::new();
        for key in replay_keystrokes(&token) {
            bytes.extend_from_slice(keystroke_bytes(key));
        }
        return PtyWrite::Bytes(bytes);
    }

    let text = bracketed_paste(raw);
    if is_upload_path(raw) {
        PtyWrite::Delayed { first: text, delay: UPLOAD_SETTLE_DELAY, then: b"\r".to_vec() }
    } else {
        PtyWrite::Bytes([text, b"\r".to_vec()].concat())
    }
}

/// Re-register with the same session id after the daemon reports
/// `{unknown:true}` (spec §7's "unknown session" error kind) — the
/// daemon dropped its record, most often after a restart.
pub async fn reregister(
    daemon: &Daemon,
    command: &str,
    chat_id: touchgrass_core::ChatId,
    owner_user_id: touchgrass_core::UserId,
    cwd: &std::path::Path,
    session_id: &str,
) {
    let _ = crate::bootstrap::register_session(
        daemon,
        command,
        chat_id,
        owner_user_id,
        cwd,
        Some(session_id.to_string()),
    )
    .await;
}

#[cfg(test)]
#[path = "input_pump_tests.rs"]
mod tests;
