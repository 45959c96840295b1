// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tg resume [--last] [--channel <value>]`: relaunch the assistant behind
//! a previous session manifest, passing its id through so the daemon
//! reattaches the same remote session instead of minting a new one.

use clap::Args;
use touchgrass_adapters::Vendor;
use touchgrass_storage::SessionManifest;
use touchgrass_daemon::env;

use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct ResumeArgs {
    /// Resume the most recent session regardless of the current directory
    #[arg(long)]
    pub last: bool,

    /// Bind the resumed session to a specific linked channel
    #[arg(long)]
    pub channel: Option<String>,
}

/// The flags that make each vendor continue its most recent conversation.
fn resume_flags(vendor: Vendor) -> &'static [&'static str] {
    match vendor {
        Vendor::Claude => &["--continue"],
        Vendor::Codex => &["resume", "--last"],
        Vendor::Pi => &["--resume"],
        Vendor::Kimi => &["--resume"],
    }
}

pub async fn run(args: ResumeArgs, _format: OutputFormat) -> Result<(), ExitError> {
    let state_dir = env::state_dir();
    let sessions_dir = env::sessions_dir(&state_dir);
    let cwd = std::env::current_dir().map_err(|e| ExitError::config(format!("could not read cwd: {e}")))?;

    let manifest = pick_resumable(&sessions_dir, &cwd, args.last)?;
    let vendor = Vendor::from_command(&manifest.command)
        .ok_or_else(|| ExitError::config(format!("unknown assistant '{}' in session manifest", manifest.command)))?;

    let extra_args: Vec<String> = resume_flags(vendor).iter().map(|s| s.to_string()).collect();
    crate::commands::launch::run_with(vendor, args.channel.as_deref(), false, Some(manifest.id), &extra_args, &cwd).await
}

fn pick_resumable(
    sessions_dir: &std::path::Path,
    cwd: &std::path::Path,
    last: bool,
) -> Result<SessionManifest, ExitError> {
    let mut manifests = touchgrass_storage::scan_manifests(sessions_dir);
    if !last {
        manifests.retain(|m| m.cwd == cwd);
    }
    manifests.sort_by(|a, b| b.started_at.cmp(&a.started_at));
    manifests.into_iter().next().ok_or_else(|| {
        ExitError::config("no previous session found to resume — pass --last to search all directories")
    })
}

#[cfg(test)]
#[path = "resume_tests.rs"]
mod tests;
