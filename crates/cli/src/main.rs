// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tg`: the interactive/agent-mode bridge between a PTY-bound assistant
//! and the touchgrass daemon (spec §6).

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

mod adapter;
mod agent_mode;
mod bootstrap;
mod client_error;
mod color;
mod commands;
mod daemon_client;
mod ensure_daemon;
mod exit_error;
mod output;

use clap::{Parser, Subcommand};

use exit_error::ExitError;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "tg", version, about = "Bridge a coding assistant to chat", styles = color::styles())]
struct Cli {
    #[arg(long, value_enum, default_value = "text", global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch Claude Code under the bridge
    Claude(commands::launch::LaunchArgs),
    /// Launch Codex under the bridge
    Codex(commands::launch::LaunchArgs),
    /// Launch Pi under the bridge
    Pi(commands::launch::LaunchArgs),
    /// Launch Kimi under the bridge
    Kimi(commands::launch::LaunchArgs),
    /// Send text or a file into a running session
    Send(commands::send::SendArgs),
    /// Resume a previous session
    Resume(commands::resume::ResumeArgs),
    /// List linked chat channels
    Channels,
    /// List active sessions
    Ls,
    /// Diagnose daemon/config health
    Doctor,
    /// Interactive first-run setup
    Setup,
    /// Generate a pairing code for a chat channel
    Pair(commands::pair::PairArgs),
    /// Inspect or edit the config file
    Config(commands::config::ConfigArgs),
    /// Run the bridge against every subdirectory under a root
    Camp(commands::camp::CampArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = dispatch(cli).await;
    match result {
        Ok(()) => {}
        Err(err) => {
            eprintln!("error: {}", err.message);
            std::process::exit(err.code);
        }
    }
}

async fn dispatch(cli: Cli) -> Result<(), ExitError> {
    let format = cli.output;
    match cli.command {
        Commands::Claude(args) => commands::launch::run(touchgrass_adapters::Vendor::Claude, args).await,
        Commands::Codex(args) => commands::launch::run(touchgrass_adapters::Vendor::Codex, args).await,
        Commands::Pi(args) => commands::launch::run(touchgrass_adapters::Vendor::Pi, args).await,
        Commands::Kimi(args) => commands::launch::run(touchgrass_adapters::Vendor::Kimi, args).await,
        Commands::Send(args) => commands::send::run(args).await,
        Commands::Resume(args) => commands::resume::run(args, format).await,
        Commands::Channels => commands::channels::run(format).await,
        Commands::Ls => commands::ls::run(format).await,
        Commands::Doctor => commands::doctor::run(format).await,
        Commands::Setup => commands::setup::run().await,
        Commands::Pair(args) => commands::pair::run(args, format).await,
        Commands::Config(args) => commands::config::run(args, format).await,
        Commands::Camp(args) => commands::camp::run(args).await,
    }
}
