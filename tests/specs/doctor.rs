// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tg doctor`: reports state-dir writability, daemon reachability, and
//! vendor binaries on `PATH`. Exercised with an empty `PATH` so the
//! vendor-binary checks are deterministic across machines.

use crate::prelude::*;

#[test]
fn reports_state_dir_and_every_vendor_name() {
    let state = State::new();
    state
        .cli()
        .env("PATH", "")
        .arg("doctor")
        .assert()
        .passes()
        .stdout_has("state dir")
        .stdout_has("claude")
        .stdout_has("codex")
        .stdout_has("pi")
        .stdout_has("kimi");
}

#[test]
fn json_output_reports_vendors_not_on_path() {
    let state = State::new();
    state
        .cli()
        .env("PATH", "")
        .args(["--output", "json", "doctor"])
        .assert()
        .passes()
        .stdout_has("\"on_path\": false");
}
