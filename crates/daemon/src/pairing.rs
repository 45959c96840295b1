// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Short-lived pairing codes (spec §4.7's `/pair` flow): `tg pair` asks the
//! daemon for a code, the user sends `/pair <code>` in chat, and the
//! channel the code was generated for is paired to the chat's sender.

use std::collections::HashMap;

use parking_lot::Mutex;
use touchgrass_core::namespace::UserId;

/// Pairing codes expire after this long if never redeemed.
pub const PAIRING_CODE_TTL_MS: u64 = 10 * 60 * 1000;

struct PendingCode {
    channel: String,
    expires_at: u64,
}

#[derive(Default)]
pub struct PairingCodes {
    codes: Mutex<HashMap<String, PendingCode>>,
}

impl PairingCodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh 6-digit code for `channel`, valid until `now_ms + TTL`.
    pub fn generate(&self, channel: impl Into<String>, now_ms: u64) -> (String, u64) {
        let code = nanoid::nanoid!(6, &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9']);
        let expires_at = now_ms + PAIRING_CODE_TTL_MS;
        self.codes.lock().insert(code.clone(), PendingCode { channel: channel.into(), expires_at });
        (code, expires_at)
    }

    /// Redeem a code, returning the channel it was generated for. A code
    /// can only ever be redeemed once, and not after it expires.
    pub fn redeem(&self, code: &str, now_ms: u64) -> Option<String> {
        let mut g = self.codes.lock();
        let pending = g.remove(code)?;
        if pending.expires_at < now_ms {
            return None;
        }
        Some(pending.channel)
    }
}

/// Records `user_id` as paired on `channel` in `config`, creating the
/// channel entry if it doesn't exist yet. No-op if already paired.
pub fn pair_user(config: &mut touchgrass_core::Config, channel: &str, user_id: UserId, now_ms: u64) {
    let entry = config.channels.entry(channel.to_string()).or_insert_with(|| touchgrass_core::ChannelConfig {
        channel_type: channel.to_string(),
        ..Default::default()
    });
    if !entry.paired_users.iter().any(|p| p.user_id == user_id) {
        entry.paired_users.push(touchgrass_core::PairedUser { user_id, paired_at: now_ms, username: None });
    }
}

#[cfg(test)]
#[path = "pairing_tests.rs"]
mod tests;
