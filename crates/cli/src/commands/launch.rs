// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tg claude|codex|pi|kimi`: spawn an assistant under the bridge, either
//! as a long-lived interactive PTY session or as a per-turn agent-mode
//! subprocess (spec §4.4).

use clap::Args;
use touchgrass_adapters::Vendor;
use touchgrass_storage::SessionManifest;

use crate::bootstrap::{register_session, resolve_chat};
use crate::ensure_daemon::ensure_daemon;
use crate::exit_error::ExitError;

#[derive(Args)]
pub struct LaunchArgs {
    /// Bind this session to a specific linked channel
    #[arg(long)]
    pub channel: Option<String>,

    /// Run as a one-shot-per-turn subprocess instead of an interactive PTY
    #[arg(long)]
    pub agent_mode: bool,

    /// Extra arguments forwarded to the underlying assistant binary
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

pub fn vendor_binary(vendor: Vendor) -> &'static str {
    match vendor {
        Vendor::Claude => "claude",
        Vendor::Codex => "codex",
        Vendor::Pi => "pi",
        Vendor::Kimi => "kimi",
    }
}

pub async fn run(vendor: Vendor, args: LaunchArgs) -> Result<(), ExitError> {
    let cwd = std::env::current_dir().map_err(|e| ExitError::config(format!("could not read cwd: {e}")))?;
    run_with(vendor, args.channel.as_deref(), args.agent_mode, None, &args.args, &cwd).await
}

/// Shared by a fresh launch, `tg resume`, and `tg camp`: register with the
/// daemon, write the session manifest, drive the adapter, then tear both
/// down. Takes `cwd` explicitly rather than reading the process's current
/// directory, since `tg camp` runs one of these per subdirectory
/// concurrently and the process only has one current directory.
pub async fn run_with(
    vendor: Vendor,
    channel: Option<&str>,
    agent_mode: bool,
    existing_id: Option<String>,
    extra_args: &[String],
    cwd: &std::path::Path,
) -> Result<(), ExitError> {
    let daemon = ensure_daemon().await?;
    let (chat_id, owner_user_id) = resolve_chat(&daemon, channel).await?;
    let command = vendor_binary(vendor);

    let registered = register_session(&daemon, command, chat_id, owner_user_id, cwd, existing_id).await?;
    let session_id = registered.session_id;

    let manifest = SessionManifest {
        id: session_id.clone(),
        command: command.to_string(),
        cwd: cwd.to_path_buf(),
        pid: std::process::id(),
        jsonl_file: None,
        started_at: now_ms(),
    };
    let sessions_dir = touchgrass_daemon::env::sessions_dir(&daemon.state_dir);
    std::fs::create_dir_all(&sessions_dir).ok();
    let _ = touchgrass_storage::write_manifest(&sessions_dir, &manifest);

    let exit_code = if agent_mode {
        crate::agent_mode::run(&daemon, &session_id, vendor, cwd, extra_args).await?
    } else {
        crate::adapter::run_interactive(&daemon, &session_id, vendor, cwd, extra_args).await?
    };

    let _ = daemon.client.exit_session(&session_id, exit_code).await;
    let _ = touchgrass_storage::remove_manifest(&sessions_dir, &session_id);

    if exit_code != 0 {
        return Err(ExitError::new(exit_code, format!("{command} exited with code {exit_code}")));
    }
    Ok(())
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
