//! `validate` command.

use std::path::Path;

use crate::cli::{OutputManager, config_file};
use crate::error::Result;
use crate::plugin::WingetPlugin;

pub fn run(plugin: &WingetPlugin, output: &OutputManager, config: &Path) -> Result<i32> {
    let raw = config_file::load(config)?;
    let response = plugin.validate(&raw);

    if response.valid {
        output.success(&format!("{} is valid", config.display()))?;
        return Ok(0);
    }

    output.error(&format!(
        "{} has {} problem(s)",
        config.display(),
        response.errors.len()
    ))?;
    for error in &response.errors {
        output.println(&error.to_string())?;
    }
    Ok(1)
}
