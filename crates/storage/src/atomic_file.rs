// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-to-temp-then-rename, with mode 0600 applied before the rename so
//! the file is never briefly world-readable.

use std::io;
use std::path::Path;

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Write `contents` to `path` atomically: write to `<path>.tmp`, chmod 0600,
/// then rename over the destination.
pub fn write_atomic_0600(path: &Path, contents: &[u8]) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&tmp_path, contents)?;
    restrict_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, path)
}

#[cfg(test)]
#[path = "atomic_file_tests.rs"]
mod tests;
