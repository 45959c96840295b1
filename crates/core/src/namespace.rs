// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Namespaced chat/user addresses: `<channel>:<native-id>[:<thread>]`.
//!
//! Every chat and user the daemon reasons about is qualified by the chat
//! network it came from, so a Telegram DM and a (future) Slack DM never
//! collide in the Session Manager's maps.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! define_namespaced_id {
    ($(#[$meta:meta])* pub struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// The chat-network prefix, e.g. `"telegram"`.
            pub fn channel(&self) -> &str {
                self.0.split(':').next().unwrap_or(&self.0)
            }

            /// The network-native id (second segment).
            pub fn native_id(&self) -> &str {
                self.0.splitn(3, ':').nth(1).unwrap_or("")
            }

            /// The optional thread/topic id (third segment), for forum
            /// supergroups where a chat is scoped to one topic.
            pub fn thread(&self) -> Option<&str> {
                self.0.splitn(3, ':').nth(2)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_namespaced_id! {
    /// A chat (DM or group) in namespaced form, e.g. `"telegram:123456"` or
    /// `"telegram:-100987:42"` for a forum topic.
    pub struct ChatId;
}

define_namespaced_id! {
    /// A user in namespaced form, e.g. `"telegram:555"`.
    pub struct UserId;
}

#[cfg(test)]
#[path = "namespace_tests.rs"]
mod tests;
