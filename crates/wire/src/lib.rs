// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! touchgrass-wire: the CLI↔daemon JSON protocol and the chat-network
//! adapter trait boundary.
//!
//! The control server speaks HTTP/1.1 with JSON bodies, authenticated by
//! a fixed-length token in the `x-touchgrass-auth` header (see
//! [`AUTH_HEADER`]). Every response is either `{ok: true, ...}` or
//! `{ok: false, error, status}`.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod chat_adapter;
pub mod error;
pub mod request;
pub mod response;

pub use chat_adapter::{ChatAdapter, ChatAdapterError, ChatSummary, PollAnswer};
pub use error::ApiError;
pub use request::*;
pub use response::*;

/// Header carrying the fixed-length auth token.
pub const AUTH_HEADER: &str = "x-touchgrass-auth";
