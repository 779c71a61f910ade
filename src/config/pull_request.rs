//! Pull request settings.

use serde::{Deserialize, Deserializer};

use super::lenient;

/// Default upstream branch the pull request targets.
pub const DEFAULT_BASE_BRANCH: &str = "master";

/// Default pull request title template.
pub const DEFAULT_TITLE: &str = "New version: {{.PackageId}} version {{.Version}}";

/// Pull request configuration.
///
/// # Configuration
///
/// ```yaml
/// pull_request:
///   fork_owner: my-bot-account
///   base_branch: master
///   title: "New version: {{.PackageId}} version {{.Version}}"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PullRequestConfig {
    /// Owner of the fork to push to.
    ///
    /// When set, the fork is assumed to exist and no identity lookup is made.
    ///
    /// Default: empty (use the authenticated user)
    #[serde(deserialize_with = "lenient::string")]
    pub fork_owner: String,

    /// Upstream branch to open the pull request against.
    ///
    /// Default: `master`
    #[serde(deserialize_with = "base_branch")]
    pub base_branch: String,

    /// Title template; `{{.PackageId}}` and `{{.Version}}` are substituted.
    #[serde(deserialize_with = "title")]
    pub title: String,
}

fn base_branch<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient::optional_string(deserializer)?.unwrap_or_else(|| DEFAULT_BASE_BRANCH.to_string()))
}

fn title<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient::optional_string(deserializer)?.unwrap_or_else(|| DEFAULT_TITLE.to_string()))
}

impl Default for PullRequestConfig {
    fn default() -> Self {
        Self {
            fork_owner: String::new(),
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}
