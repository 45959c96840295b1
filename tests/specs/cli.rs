// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level `tg` argument parsing: help/version output and rejection of
//! unknown assistants, none of which need a running daemon.

use crate::prelude::*;

#[test]
fn no_args_shows_usage_and_fails() {
    let state = State::new();
    state.cli().assert().fails().stderr_has("Usage:");
}

#[test]
fn help_shows_every_subcommand() {
    let state = State::new();
    state
        .cli()
        .arg("--help")
        .assert()
        .passes()
        .stdout_has("claude")
        .stdout_has("codex")
        .stdout_has("camp")
        .stdout_has("resume");
}

#[test]
fn version_shows_version() {
    let state = State::new();
    state.cli().arg("--version").assert().passes().stdout_has("tg");
}

#[test]
fn launch_help_shows_agent_mode_flag() {
    let state = State::new();
    state.cli().args(["claude", "--help"]).assert().passes().stdout_has("--agent-mode");
}
