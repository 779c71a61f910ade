//! `info` command.

use crate::cli::OutputManager;
use crate::error::{CliError, Result};
use crate::plugin::WingetPlugin;

pub fn run(plugin: &WingetPlugin, output: &OutputManager, json: bool) -> Result<i32> {
    let info = plugin.info();

    if json {
        let rendered =
            serde_json::to_string_pretty(&info).map_err(|e| CliError::InvalidArguments {
                reason: format!("cannot render descriptor: {e}"),
            })?;
        output.println(&rendered)?;
        return Ok(0);
    }

    output.section(&format!("{} {}", info.name, info.version))?;
    output.indent(&info.description)?;
    let hooks: Vec<_> = info.hooks.iter().map(|h| h.as_str()).collect();
    output.indent(&format!("hooks: {}", hooks.join(", ")))?;
    Ok(0)
}
