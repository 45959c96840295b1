// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tg camp --root <dir>`: run an agent-mode session against every
//! immediate subdirectory of `root`, so one chat can drive a fleet of
//! working trees concurrently.

use std::path::{Path, PathBuf};

use clap::Args;
use touchgrass_adapters::Vendor;

use crate::exit_error::ExitError;

#[derive(Args)]
pub struct CampArgs {
    /// Directory whose immediate subdirectories each become a session
    #[arg(long)]
    pub root: PathBuf,

    /// Which assistant to run in each subdirectory
    #[arg(long, default_value = "claude")]
    pub vendor: String,

    /// Bind every session to a specific linked channel
    #[arg(long)]
    pub channel: Option<String>,
}

pub async fn run(args: CampArgs) -> Result<(), ExitError> {
    let vendor = Vendor::from_command(&args.vendor)
        .ok_or_else(|| ExitError::config(format!("unknown vendor '{}'", args.vendor)))?;
    let dirs = subdirectories(&args.root)?;
    if dirs.is_empty() {
        return Err(ExitError::config(format!("no subdirectories found under {}", args.root.display())));
    }

    let mut handles = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let channel = args.channel.clone();
        handles.push(tokio::spawn(async move {
            let result =
                crate::commands::launch::run_with(vendor, channel.as_deref(), true, None, &[], &dir).await;
            if let Err(err) = result {
                eprintln!("{}: {}", dir.display(), err.message);
            }
        }));
    }

    for handle in handles {
        let _ = handle.await;
    }
    Ok(())
}

fn subdirectories(root: &Path) -> Result<Vec<PathBuf>, ExitError> {
    let entries = std::fs::read_dir(root)
        .map_err(|e| ExitError::config(format!("could not read {}: {e}", root.display())))?;
    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

#[cfg(test)]
#[path = "camp_tests.rs"]
mod tests;
