// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! touchgrass-adapters: per-vendor CLI adapter knowledge — approval-prompt
//! detection, poll keystroke replay, resume-arg parsing, and JSONL
//! directory resolution — plus the reference Telegram long-poll
//! `ChatAdapter` (only the trait itself lives in `touchgrass-wire`, so a
//! deployment can swap in a different chat network without touching this
//! crate's vendor logic).

pub mod ansi;
pub mod approval;
pub mod jsonl_paths;
pub mod poll_replay;
pub mod ring;
pub mod telegram_longpoll;
pub mod vendor;

#[cfg(feature = "test-support")]
pub mod fake;

pub use ansi::strip_ansi_escapes;
pub use approval::{detect_approval_prompt, ApprovalPrompt, ATTRIBUTION_ALLOWLIST};
pub use jsonl_paths::project_dir;
pub use poll_replay::{
    bracketed_paste, is_upload_path, parse_poll_token, replay_keystrokes, Keystroke, PollToken,
};
pub use ring::PtyRing;
pub use telegram_longpoll::{InboundBatch, InboundMessage, InboundPollAnswer, TelegramLongPollAdapter};
pub use vendor::Vendor;

mod resume_args;
pub use resume_args::{parse_codex_resume_args, CodexResumeArgs};
