// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tg config {show|set k v|path}`: inspect or edit the daemon's config
//! file directly (the daemon picks up the change on its next read).

use clap::{Args, Subcommand};
use touchgrass_daemon::env;

use crate::exit_error::ExitError;
use crate::output::{format_or_json, OutputFormat};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the current config as JSON
    Show,
    /// Set a single dotted-path key to a value
    Set { key: String, value: String },
    /// Print the config file's path
    Path,
}

pub async fn run(args: ConfigArgs, format: OutputFormat) -> Result<(), ExitError> {
    let state_dir = env::state_dir();
    let config_path = env::config_path(&state_dir);

    match args.command {
        ConfigCommand::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
        ConfigCommand::Show => {
            let config = touchgrass_storage::load_config(&config_path)
                .map_err(|e| ExitError::config(format!("could not load config: {e}")))?;
            format_or_json(format, &config, || {
                println!("{}", serde_json::to_string_pretty(&config).unwrap_or_default());
            })
            .map_err(|e| ExitError::config(e.to_string()))
        }
        ConfigCommand::Set { key, value } => {
            let mut config = touchgrass_storage::load_config(&config_path)
                .map_err(|e| ExitError::config(format!("could not load config: {e}")))?;
            set_dotted_key(&mut config, &key, &value)?;
            touchgrass_storage::save_config(&config_path, &config)
                .map_err(|e| ExitError::config(format!("could not save config: {e}")))?;
            println!("{key} = {value}");
            Ok(())
        }
    }
}

/// Only the settings a human is expected to hand-edit; everything else
/// (channels, pairing, preferences) is managed through `tg pair` and the
/// chat surface instead.
fn set_dotted_key(config: &mut touchgrass_core::Config, key: &str, value: &str) -> Result<(), ExitError> {
    match key {
        "settings.output_batch_min_ms" => config.settings.output_batch_min_ms = parse(key, value)?,
        "settings.output_batch_max_ms" => config.settings.output_batch_max_ms = parse(key, value)?,
        "settings.output_buffer_max_chars" => config.settings.output_buffer_max_chars = parse(key, value)?,
        "settings.max_sessions" => config.settings.max_sessions = parse(key, value)?,
        "settings.default_shell" => config.settings.default_shell = Some(value.to_string()),
        other => return Err(ExitError::config(format!("unknown config key '{other}'"))),
    }
    Ok(())
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ExitError> {
    value.parse().map_err(|_| ExitError::config(format!("invalid value for {key}: '{value}'")))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
