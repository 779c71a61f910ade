//! Loading plugin configuration files.

use std::path::Path;

use serde_json::Value;

use crate::error::CliError;

/// Reads a configuration file into an untyped mapping.
///
/// Files ending in `.json` are parsed as JSON and everything else as YAML.
/// Both produce the same mapping the release host would pass in.
pub fn load(path: &Path) -> Result<Value, CliError> {
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|e| CliError::ConfigFile {
        path: display.clone(),
        reason: e.to_string(),
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        serde_json::from_str(&text).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&text).map_err(|e| e.to_string())
    };

    parsed.map_err(|reason| CliError::ConfigFile {
        path: display,
        reason,
    })
}
