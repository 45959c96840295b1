// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session manifest files (spec §4.4/§6): `<sessionsDir>/<id>.json`, mode
//! 0600, written by the CLI adapter on session start and removed on exit.
//!
//! Scanning on daemon startup follows the same read-everything,
//! skip-corrupt-files shape as breadcrumb recovery: a manifest that fails to
//! parse is logged and dropped rather than aborting the whole scan.

use crate::atomic_file::write_atomic_0600;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to write manifest {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("failed to remove manifest {path}: {source}")]
    Remove { path: PathBuf, source: std::io::Error },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionManifest {
    pub id: String,
    pub command: String,
    pub cwd: PathBuf,
    pub pid: u32,
    #[serde(rename = "jsonlFile")]
    pub jsonl_file: Option<String>,
    #[serde(rename = "startedAt")]
    pub started_at: u64,
}

fn manifest_path(sessions_dir: &Path, id: &str) -> PathBuf {
    sessions_dir.join(format!("{id}.json"))
}

/// Write the manifest atomically at `<sessions_dir>/<id>.json`, mode 0600.
pub fn write_manifest(sessions_dir: &Path, manifest: &SessionManifest) -> Result<(), ManifestError> {
    let path = manifest_path(sessions_dir, &manifest.id);
    let json = serde_json::to_vec_pretty(manifest).unwrap_or_default();
    write_atomic_0600(&path, &json).map_err(|source| ManifestError::Write { path, source })
}

/// Remove the manifest for `id`, if present. A missing file is not an error
/// — the adapter calls this unconditionally on exit.
pub fn remove_manifest(sessions_dir: &Path, id: &str) -> Result<(), ManifestError> {
    let path = manifest_path(sessions_dir, id);
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ManifestError::Remove { path, source }),
    }
}

/// Scan `sessions_dir` for `*.json` manifests. Files that fail to read or
/// parse are skipped with a warning rather than failing the whole scan.
pub fn scan_manifests(sessions_dir: &Path) -> Vec<SessionManifest> {
    let mut manifests = Vec::new();

    let entries = match std::fs::read_dir(sessions_dir) {
        Ok(entries) => entries,
        Err(_) => return manifests,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let is_json = path.extension().and_then(|ext| ext.to_str()) == Some("json");
        if !is_json {
            continue;
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<SessionManifest>(&content) {
                Ok(manifest) => manifests.push(manifest),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping corrupt session manifest");
                }
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read session manifest");
            }
        }
    }

    manifests
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
