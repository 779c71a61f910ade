//! Release-tool plugin surface.
//!
//! The host hands over a raw configuration mapping, the release context and
//! a dry-run flag; the plugin answers with a success flag and a message. Only
//! the post-publish hook does any work.

mod hook;

pub use hook::Hook;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::config::{FieldError, WingetConfig, validate};
use crate::error::Error;
use crate::github::{GitHubClient, GitHubEndpoint};
use crate::hash::InstallerHasher;
use crate::manifest::ManifestSettings;
use crate::publish::Publisher;

/// Name the plugin registers under.
pub const PLUGIN_NAME: &str = "winget";

/// One-line description shown by hosts.
pub const PLUGIN_DESCRIPTION: &str =
    "Windows Package Manager (winget) manifest generation and PR submission";

/// Plugin descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub hooks: Vec<Hook>,
}

/// Release details supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReleaseContext {
    /// Version being released, e.g. `1.2.3`.
    pub version: String,
}

/// A hook invocation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExecuteRequest {
    pub hook: Hook,
    /// Raw plugin configuration.
    #[serde(default)]
    pub config: Value,
    #[serde(default)]
    pub context: ReleaseContext,
    #[serde(default)]
    pub dry_run: bool,
}

/// Result of a hook invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecuteResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_url: Option<String>,
}

impl ExecuteResponse {
    fn failure(message: String) -> Self {
        Self {
            success: false,
            message,
            pr_url: None,
        }
    }
}

/// Result of a pre-flight validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidateResponse {
    fn from_errors(errors: Vec<FieldError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// The winget publisher plugin.
///
/// Endpoint and manifest settings are fixed at construction; the
/// environment lookup used for the token fallback can be replaced for tests.
#[derive(Debug, Clone)]
pub struct WingetPlugin {
    endpoint: GitHubEndpoint,
    settings: ManifestSettings,
    env: fn(&str) -> Option<String>,
}

impl Default for WingetPlugin {
    fn default() -> Self {
        Self::new(GitHubEndpoint::default(), ManifestSettings::default())
    }
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl WingetPlugin {
    pub fn new(endpoint: GitHubEndpoint, settings: ManifestSettings) -> Self {
        Self {
            endpoint,
            settings,
            env: process_env,
        }
    }

    /// Replaces the environment lookup used for the `GITHUB_TOKEN` fallback.
    pub fn with_env(mut self, env: fn(&str) -> Option<String>) -> Self {
        self.env = env;
        self
    }

    pub fn info(&self) -> PluginInfo {
        PluginInfo {
            name: PLUGIN_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: PLUGIN_DESCRIPTION.to_string(),
            hooks: vec![Hook::PostPublish],
        }
    }

    fn parse(&self, raw: &Value) -> Result<WingetConfig, crate::error::ValidationError> {
        WingetConfig::from_value_with_env(raw, self.env)
    }

    /// Checks a raw configuration without touching the network.
    pub fn validate(&self, raw: &Value) -> ValidateResponse {
        match self.parse(raw) {
            Ok(config) => ValidateResponse::from_errors(validate(&config)),
            Err(err) => ValidateResponse::from_errors(vec![FieldError::new(
                "config",
                err.to_string(),
            )]),
        }
    }

    /// Runs a hook. Hooks other than post-publish succeed without doing anything.
    pub async fn execute(
        &self,
        request: &ExecuteRequest,
        cancel: &CancellationToken,
    ) -> ExecuteResponse {
        log::debug!("Executing hook {} for {} plugin", request.hook, PLUGIN_NAME);
        match request.hook {
            Hook::PostPublish => self.post_publish(request, cancel).await,
            other => ExecuteResponse {
                success: true,
                message: format!("Hook {other} not handled by winget plugin"),
                pr_url: None,
            },
        }
    }

    async fn post_publish(
        &self,
        request: &ExecuteRequest,
        cancel: &CancellationToken,
    ) -> ExecuteResponse {
        let config = match self.parse(&request.config) {
            Ok(config) => config,
            Err(err) => return ExecuteResponse::failure(format!("Invalid configuration: {err}")),
        };
        let dry_run = config.dry_run || request.dry_run;

        let publisher = match self.publisher(&config) {
            Ok(publisher) => publisher,
            Err(err) => return ExecuteResponse::failure(err.to_string()),
        };

        let outcome = publisher
            .publish(&config, &request.context.version, dry_run, cancel)
            .await;

        ExecuteResponse {
            success: outcome.success,
            message: outcome.message,
            pr_url: outcome.pr_url,
        }
    }

    fn publisher(
        &self,
        config: &WingetConfig,
    ) -> Result<Publisher<InstallerHasher, GitHubClient>, Error> {
        let fork_owner = Some(config.pull_request.fork_owner.clone());
        let client = GitHubClient::new(&config.github_token, fork_owner, self.endpoint.clone())?;
        Ok(Publisher::new(
            InstallerHasher::new()?,
            client,
            self.settings.clone(),
        ))
    }
}
