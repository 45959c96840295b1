// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSONL directory watch + incremental tail (spec §4.4.2): snapshot the
//! vendor's project directory, watch for newly appeared `.jsonl` files,
//! and tail the active one by byte offset. Claude's plan-mode rollover
//! (switching tail to a freshly appeared file that references the same
//! `sessionId`) is resolved here too.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use serde_json::Value;

/// How many leading records of a newly appeared file are checked for a
/// `sessionId` match before giving up on treating it as a rollover.
const ROLLOVER_SCAN_LIMIT: usize = 80;

/// List `.jsonl` files directly inside `dir`, oldest-to-newest by name
/// (vendors use sortable, typically timestamp-derived, file names).
pub fn list_jsonl_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else { return Vec::new() };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("jsonl"))
        .collect();
    files.sort();
    files
}

/// The file the tailer should be watching right after startup: the most
/// recently created `.jsonl` file in the snapshot, if any.
pub fn pick_initial_file(files: &[PathBuf]) -> Option<PathBuf> {
    files.last().cloned()
}

/// True iff any of `candidate`'s first [`ROLLOVER_SCAN_LIMIT`] records
/// carries a top-level `sessionId` equal to `active_session_id` — Claude's
/// plan-mode rollover signature (spec §4.4.2).
pub fn file_references_session(candidate: &Path, active_session_id: &str) -> bool {
    let Ok(file) = File::open(candidate) else { return false };
    let reader = BufReader::new(file);
    for line in reader.lines().take(ROLLOVER_SCAN_LIMIT).map_while(Result::ok) {
        let Ok(record) = serde_json::from_str::<Value>(&line) else { continue };
        if record.get("sessionId").and_then(Value::as_str) == Some(active_session_id) {
            return true;
        }
    }
    false
}

/// The top-level `sessionId` of the first parseable record in `path`, used
/// to seed rollover detection for files the tailer starts on directly.
pub fn first_session_id(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let reader = BufReader::new(file);
    for line in reader.lines().map_while(Result::ok) {
        if let Ok(record) = serde_json::from_str::<Value>(&line) {
            if let Some(id) = record.get("sessionId").and_then(Value::as_str) {
                return Some(id.to_string());
            }
        }
    }
    None
}

/// Tracks byte-offset progress through one active JSONL file.
pub struct JsonlTailer {
    path: PathBuf,
    offset: u64,
}

impl JsonlTailer {
    pub fn new(path: PathBuf) -> Self {
        Self { path, offset: 0 }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn switch_to(&mut self, path: PathBuf) {
        self.path = path;
        self.offset = 0;
    }

    /// Read any bytes appended since the last call, returning complete
    /// lines only (a partial trailing line is left for the next read by
    /// not advancing the offset past it).
    pub fn read_new_lines(&mut self) -> Vec<String> {
        let Ok(mut file) = File::open(&self.path) else { return Vec::new() };
        let Ok(len) = file.metadata().map(|m| m.len()) else { return Vec::new() };
        if len < self.offset {
            // File was truncated or replaced out from under us; restart.
            self.offset = 0;
        }
        if file.seek(SeekFrom::Start(self.offset)).is_err() {
            return Vec::new();
        }

        let mut buf = String::new();
        {
            use std::io::Read;
            if file.read_to_string(&mut buf).is_err() {
                return Vec::new();
            }
        }

        let mut lines = Vec::new();
        let mut consumed = 0u64;
        for line in buf.split_inclusive('\n') {
            if !line.ends_with('\n') {
                break; // partial trailing line, leave it for next read
            }
            consumed += line.len() as u64;
            let trimmed = line.trim_end_matches('\n');
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }
        self.offset += consumed;
        lines
    }
}

#[cfg(test)]
#[path = "tail_tests.rs"]
mod tests;
