// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session identifier: `r-` followed by 6 lowercase hex characters.
//!
//! Fixed-width and `Copy`, so the Session Manager's registries can key on
//! it without touching the heap on lookup.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

const PREFIX: &str = "r-";
const SUFFIX_LEN: usize = 6;
const TOTAL_LEN: usize = PREFIX.len() + SUFFIX_LEN;
const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Unique identifier for a remote session (`r-` + 6 hex chars).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId {
    buf: [u8; TOTAL_LEN],
}

impl SessionId {
    /// Generate a fresh random session id. Callers that need uniqueness
    /// against an existing registry should re-roll on collision.
    pub fn generate() -> Self {
        let mut buf = [0u8; TOTAL_LEN];
        buf[..PREFIX.len()].copy_from_slice(PREFIX.as_bytes());
        for slot in buf[PREFIX.len()..].iter_mut() {
            let nibble = rand::random::<u8>() & 0x0f;
            *slot = HEX_DIGITS[nibble as usize];
        }
        Self { buf }
    }

    /// Parse an existing id string (reconnect path). Returns `None` if the
    /// string doesn't match the `r-` + 6 hex shape.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != TOTAL_LEN || !s.starts_with(PREFIX) {
            return None;
        }
        if !bytes[PREFIX.len()..].iter().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let mut buf = [0u8; TOTAL_LEN];
        buf.copy_from_slice(bytes);
        Some(Self { buf })
    }

    pub fn as_str(&self) -> &str {
        // Invariant: only ever constructed from ASCII bytes above.
        std::str::from_utf8(&self.buf).unwrap_or(PREFIX)
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({:?})", self.as_str())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Borrow<str> for SessionId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for SessionId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl Serialize for SessionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SessionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SessionId::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid session id: {s:?}")))
    }
}

/// Returns a string slice truncated to at most `n` bytes.
pub fn short(s: &str, n: usize) -> &str {
    if s.len() <= n {
        s
    } else {
        &s[..n]
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
