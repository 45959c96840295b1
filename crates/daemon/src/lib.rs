// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! touchgrass-daemon: the long-lived background process bridging PTY-bound
//! CLI adapters to a chat network. Owns the Session Manager, the command
//! router, background-job/status-board tracking, dead-chat cleanup, and
//! the lifecycle/lock-file handling that makes `ensureDaemon` idempotent.

pub mod board_tracker;
pub mod dead_chat;
pub mod dispatch;
pub mod env;
pub mod lifecycle;
pub mod pairing;
pub mod router;
pub mod server;
pub mod session_manager;

pub use board_tracker::{BoardTracker, JobEventOutcome};
pub use dead_chat::purge_dead_chat;
pub use router::{Command, CommandRouter, RouterOutcome};
pub use session_manager::SessionManager;
