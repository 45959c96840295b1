// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config file persistence (spec §6): `<data-dir>/config.json`, mode 0600.

use crate::atomic_file::write_atomic_0600;
use std::path::{Path, PathBuf};
use thiserror::Error;
use touchgrass_core::Config;

#[derive(Debug, Error)]
pub enum ConfigStoreError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
}

/// Load the config at `path`, or the default (unpaired, no channels)
/// config if the file does not exist yet.
pub fn load_config(path: &Path) -> Result<Config, ConfigStoreError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|source| ConfigStoreError::Read { path: path.to_path_buf(), source })?;
    serde_json::from_str(&raw).map_err(|source| ConfigStoreError::Parse { path: path.to_path_buf(), source })
}

/// Write the config atomically, mode 0600.
pub fn save_config(path: &Path, config: &Config) -> Result<(), ConfigStoreError> {
    let json = serde_json::to_vec_pretty(config)
        .map_err(|source| ConfigStoreError::Parse { path: path.to_path_buf(), source })?;
    write_atomic_0600(path, &json).map_err(|source| ConfigStoreError::Write { path: path.to_path_buf(), source })
}

#[cfg(test)]
#[path = "config_store_tests.rs"]
mod tests;
