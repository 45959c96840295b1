// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test scaffolding: an isolated state directory per test and a
//! small fluent wrapper around `assert_cmd` for asserting on `tg`'s
//! stdout.

use std::path::PathBuf;

use assert_cmd::Command;

/// A `tg` invocation bound to its own `TOUCHGRASS_STATE_DIR`, so parallel
/// tests never see each other's config, socket, or pid file.
pub struct State {
    dir: tempfile::TempDir,
}

impl State {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().expect("tempdir") }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("tg").expect("tg binary built");
        cmd.env("TOUCHGRASS_STATE_DIR", self.path());
        cmd
    }
}

pub trait AssertExt {
    fn passes(self) -> Self;
    fn fails(self) -> Self;
    fn stdout_has(self, needle: &str) -> Self;
    fn stderr_has(self, needle: &str) -> Self;
}

impl AssertExt for assert_cmd::assert::Assert {
    fn passes(self) -> Self {
        self.success()
    }

    fn fails(self) -> Self {
        self.failure()
    }

    fn stdout_has(self, needle: &str) -> Self {
        let output = self.get_output().stdout.clone();
        let text = String::from_utf8_lossy(&output);
        assert!(text.contains(needle), "expected stdout to contain {needle:?}, got:\n{text}");
        self
    }

    fn stderr_has(self, needle: &str) -> Self {
        let output = self.get_output().stderr.clone();
        let text = String::from_utf8_lossy(&output);
        assert!(text.contains(needle), "expected stderr to contain {needle:?}, got:\n{text}");
        self
    }
}
