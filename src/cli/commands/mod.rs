//! Command execution for the publisher CLI.

mod info;
mod publish;
mod validate;

use super::{Command, OutputManager};
use crate::error::Result;
use crate::plugin::WingetPlugin;

/// Runs a parsed command and returns the process exit code.
pub async fn execute(command: Command, plugin: &WingetPlugin, output: &OutputManager) -> Result<i32> {
    match command {
        Command::Publish {
            config,
            version,
            dry_run,
        } => publish::run(plugin, output, &config, &version, dry_run).await,
        Command::Validate { config } => validate::run(plugin, output, &config),
        Command::Info { json } => info::run(plugin, output, json),
    }
}
