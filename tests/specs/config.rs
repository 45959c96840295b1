// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tg config`: reads and edits `config.json` directly, with no daemon
//! needed for any of the three subcommands.

use crate::prelude::*;

#[test]
fn path_prints_a_path_under_the_state_dir() {
    let state = State::new();
    state
        .cli()
        .arg("config")
        .arg("path")
        .assert()
        .passes()
        .stdout_has("config.json");
}

#[test]
fn show_prints_default_config_when_no_file_exists_yet() {
    let state = State::new();
    state
        .cli()
        .args(["config", "show"])
        .assert()
        .passes()
        .stdout_has("settings");
}

#[test]
fn set_then_show_round_trips_a_known_key() {
    let state = State::new();
    state
        .cli()
        .args(["config", "set", "settings.max_sessions", "7"])
        .assert()
        .passes()
        .stdout_has("max_sessions = 7");

    state
        .cli()
        .args(["config", "show"])
        .assert()
        .passes()
        .stdout_has("\"max_sessions\": 7");
}

#[test]
fn set_rejects_an_unknown_key() {
    let state = State::new();
    state
        .cli()
        .args(["config", "set", "settings.not_a_real_key", "1"])
        .assert()
        .fails()
        .stderr_has("unknown config key");
}

#[test]
fn set_rejects_a_non_numeric_value_for_a_numeric_key() {
    let state = State::new();
    state
        .cli()
        .args(["config", "set", "settings.max_sessions", "not-a-number"])
        .assert()
        .fails()
        .stderr_has("invalid value");
}
