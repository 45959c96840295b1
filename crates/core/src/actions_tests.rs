// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use yare::parameterized;

#[test]
fn kill_always_wins_either_side() {
    assert_eq!(RemoteControlAction::merge(Some(RemoteControlAction::Stop), RemoteControlAction::Kill), RemoteControlAction::Kill);
    assert_eq!(RemoteControlAction::merge(Some(RemoteControlAction::Kill), RemoteControlAction::Stop), RemoteControlAction::Kill);
    assert_eq!(RemoteControlAction::merge(None, RemoteControlAction::Kill), RemoteControlAction::Kill);
}

#[test]
fn stop_does_not_preempt_existing_non_stop() {
    let current = Some(RemoteControlAction::Start { tool: None, args: None });
    assert_eq!(RemoteControlAction::merge(current.clone(), RemoteControlAction::Stop), current.unwrap());
}

#[test]
fn stop_is_stored_when_nothing_pending() {
    assert_eq!(RemoteControlAction::merge(None, RemoteControlAction::Stop), RemoteControlAction::Stop);
}

#[test]
fn non_stop_incoming_always_replaces() {
    let current = Some(RemoteControlAction::Stop);
    let incoming = RemoteControlAction::Resume { session_ref: "abc".into() };
    assert_eq!(RemoteControlAction::merge(current, incoming.clone()), incoming);
}

#[test]
fn stop_kill_sequence_drains_kill() {
    // Mirrors the daemon-level scenario in the spec's testable properties:
    // requestRemoteStop then requestRemoteKill -> drain returns Kill.
    let mut slot = None;
    slot = Some(RemoteControlAction::merge(slot, RemoteControlAction::Stop));
    slot = Some(RemoteControlAction::merge(slot, RemoteControlAction::Kill));
    assert_eq!(slot, Some(RemoteControlAction::Kill));
}

#[parameterized(
    plain_stop = {"stop", true},
    plain_kill = {"kill", true},
    plain_garbage = {"frobnicate", false},
)]
fn parses_plain_strings(input: &str, expect_some: bool) {
    let value = json!(input);
    assert_eq!(parse_remote_control_action(&value).is_some(), expect_some);
}

#[test]
fn parses_resume_with_safe_ref() {
    let value = json!({"type": "resume", "sessionRef": "019c56ac-417b-7180-bd3f-2ed6e25885e3"});
    assert_eq!(
        parse_remote_control_action(&value),
        Some(RemoteControlAction::Resume { session_ref: "019c56ac-417b-7180-bd3f-2ed6e25885e3".into() })
    );
}

#[parameterized(
    semicolon = {"foo; rm -rf /"},
    backtick = {"foo`id`"},
    dollar = {"foo$(id)"},
    pipe = {"foo|id"},
    quote = {"foo\"bar"},
)]
fn rejects_unsafe_session_refs(unsafe_ref: &str) {
    let value = json!({"type": "resume", "sessionRef": unsafe_ref});
    assert_eq!(parse_remote_control_action(&value), None);
}

#[test]
fn parses_start_with_tool_and_args() {
    let value = json!({"type": "start", "tool": "claude", "args": ["--resume", "abc"]});
    assert_eq!(
        parse_remote_control_action(&value),
        Some(RemoteControlAction::Start {
            tool: Some("claude".into()),
            args: Some(vec!["--resume".into(), "abc".into()]),
        })
    );
}

#[test]
fn parses_bare_start() {
    let value = json!({"type": "start"});
    assert_eq!(parse_remote_control_action(&value), Some(RemoteControlAction::Start { tool: None, args: None }));
}

#[test]
fn rejects_unknown_shapes() {
    assert_eq!(parse_remote_control_action(&json!(42)), None);
    assert_eq!(parse_remote_control_action(&json!({"type": "teleport"})), None);
    assert_eq!(parse_remote_control_action(&json!({})), None);
}
