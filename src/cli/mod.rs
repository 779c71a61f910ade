//! Command line interface for the winget publisher.
//!
//! This module parses arguments, loads the configuration file and runs the
//! selected command through the plugin surface, so the CLI behaves exactly
//! like a release host invoking the plugin.

mod args;
mod commands;
pub mod config_file;
mod output;

pub use args::{Args, Command};
pub use output::OutputManager;

use crate::error::{CliError, Result};
use crate::plugin::WingetPlugin;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let plugin = WingetPlugin::default();
    let output = OutputManager::new();
    commands::execute(args.command, &plugin, &output).await
}
