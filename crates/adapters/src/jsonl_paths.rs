// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic JSONL project-directory resolution per vendor (§4.4.2).
//! The adapter watches this directory for newly appeared session files
//! rather than being told the path by the assistant.

use crate::vendor::Vendor;
use std::path::{Path, PathBuf};

/// Claude Code slugifies a cwd into its project directory name by
/// replacing path separators with dashes.
fn claude_slug(cwd: &Path) -> String {
    cwd.to_string_lossy().replace(['/', '\\'], "-")
}

/// Pi encodes a cwd between `--` markers, replacing separators with `-`.
fn pi_encoded_cwd(cwd: &Path) -> String {
    format!("--{}--", claude_slug(cwd))
}

/// Resolve the directory this vendor writes session JSONL files under,
/// for a session rooted at `cwd`. `today` is the UTC calendar date used
/// by Codex's `YYYY/MM/DD` layout.
pub fn project_dir(vendor: Vendor, home: &Path, cwd: &Path, today: (i32, u32, u32)) -> PathBuf {
    match vendor {
        Vendor::Claude => home.join(".claude").join("projects").join(claude_slug(cwd)),
        Vendor::Codex => {
            let (year, month, day) = today;
            home.join(".codex")
                .join("sessions")
                .join(format!("{year:04}"))
                .join(format!("{month:02}"))
                .join(format!("{day:02}"))
        }
        Vendor::Pi => home.join(".pi").join("agent").join("sessions").join(pi_encoded_cwd(cwd)),
        Vendor::Kimi => home.join(".kimi").join("sessions").join(claude_slug(cwd)),
    }
}

#[cfg(test)]
#[path = "jsonl_paths_tests.rs"]
mod tests;
