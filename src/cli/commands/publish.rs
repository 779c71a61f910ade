//! `publish` command.

use std::path::Path;

use tokio_util::sync::CancellationToken;

use crate::cli::{OutputManager, config_file};
use crate::error::Result;
use crate::plugin::{ExecuteRequest, Hook, ReleaseContext, WingetPlugin};

pub async fn run(
    plugin: &WingetPlugin,
    output: &OutputManager,
    config: &Path,
    version: &str,
    dry_run: bool,
) -> Result<i32> {
    let raw = config_file::load(config)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling publish");
            on_interrupt.cancel();
        }
    });

    let request = ExecuteRequest {
        hook: Hook::PostPublish,
        config: raw,
        context: ReleaseContext {
            version: version.trim().to_string(),
        },
        dry_run,
    };

    let response = plugin.execute(&request, &cancel).await;
    if response.success {
        output.success(&response.message)?;
        Ok(0)
    } else {
        output.error(&response.message)?;
        Ok(1)
    }
}
