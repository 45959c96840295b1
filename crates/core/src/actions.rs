// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote control actions: the single-valued cancellation/restart channel
//! between the daemon and a running CLI adapter.
//!
//! `Kill` is strictly the highest priority action; the stored control slot
//! never queues, it merges (see [`RemoteControlAction::merge`]).

use serde::{Deserialize, Serialize};

/// Characters that disqualify a `Resume` session ref from being forwarded
/// to a shell-invoked resume flag.
const SHELL_UNSAFE: &[char] =
    &[';', '&', '|', '`', '$', '(', ')', '{', '}', '!', '#', '<', '>', '\\', '\'', '"'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RemoteControlAction {
    Stop,
    Kill,
    Resume { session_ref: String },
    Start {
        #[serde(default)]
        tool: Option<String>,
        #[serde(default)]
        args: Option<Vec<String>>,
    },
}

impl RemoteControlAction {
    /// Merge an incoming action into the current stored action.
    ///
    /// `Kill` always wins. Otherwise the incoming action replaces the
    /// current one unless the incoming action is `Stop` and a non-`Stop`
    /// action is already stored, in which case the stored one is kept.
    pub fn merge(current: Option<Self>, incoming: Self) -> Self {
        if matches!(current, Some(Self::Kill)) || matches!(incoming, Self::Kill) {
            return Self::Kill;
        }
        if !matches!(incoming, Self::Stop) {
            return incoming;
        }
        match current {
            Some(action) if !matches!(action, Self::Stop) => action,
            _ => Self::Stop,
        }
    }

    /// True iff `session_ref` is safe to interpolate into a resume
    /// invocation (contains none of the shell metacharacters).
    pub fn is_safe_session_ref(session_ref: &str) -> bool {
        !session_ref.chars().any(|c| SHELL_UNSAFE.contains(&c))
    }
}

/// Parse a loosely-typed control request into a [`RemoteControlAction`].
///
/// Accepts the bare strings `"stop"`/`"kill"`, or a JSON value shaped like
/// `{"type":"resume","sessionRef":"..."}` / `{"type":"start", ...}`. Returns
/// `None` for anything else, including a `resume` whose `sessionRef`
/// contains shell-unsafe characters.
pub fn parse_remote_control_action(value: &serde_json::Value) -> Option<RemoteControlAction> {
    if let Some(s) = value.as_str() {
        return match s {
            "stop" => Some(RemoteControlAction::Stop),
            "kill" => Some(RemoteControlAction::Kill),
            _ => None,
        };
    }
    let obj = value.as_object()?;
    match obj.get("type")?.as_str()? {
        "resume" => {
            let session_ref = obj.get("sessionRef")?.as_str()?.to_string();
            if !RemoteControlAction::is_safe_session_ref(&session_ref) {
                return None;
            }
            Some(RemoteControlAction::Resume { session_ref })
        }
        "start" => {
            let tool = obj.get("tool").and_then(|v| v.as_str()).map(str::to_string);
            let args = obj.get("args").and_then(|v| v.as_array()).map(|arr| {
                arr.iter().filter_map(|v| v.as_str().map(str::to_string)).collect()
            });
            Some(RemoteControlAction::Start { tool, args })
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
