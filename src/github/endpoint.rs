//! Where and how the hosting API is reached.

use std::time::Duration;

/// Public API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
/// Owner of the community manifest repository.
pub const UPSTREAM_OWNER: &str = "microsoft";
/// Name of the community manifest repository.
pub const UPSTREAM_REPO: &str = "winget-pkgs";
/// Pinned REST API version.
pub const API_VERSION: &str = "2022-11-28";
/// Pause after requesting a fork; the server creates forks asynchronously.
pub const FORK_SETTLE_DELAY: Duration = Duration::from_secs(5);
/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Immutable endpoint settings injected into [`GitHubClient`](super::GitHubClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubEndpoint {
    /// Base URL without a trailing slash.
    pub api_base: String,
    pub upstream_owner: String,
    pub upstream_repo: String,
    pub api_version: String,
    pub fork_settle_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for GitHubEndpoint {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            upstream_owner: UPSTREAM_OWNER.to_string(),
            upstream_repo: UPSTREAM_REPO.to_string(),
            api_version: API_VERSION.to_string(),
            fork_settle_delay: FORK_SETTLE_DELAY,
            request_timeout: REQUEST_TIMEOUT,
        }
    }
}

impl GitHubEndpoint {
    /// Default settings pointed at a different API base, e.g. a local stub.
    ///
    /// The settling delay is dropped so stubbed fork creation returns at once.
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            fork_settle_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    pub(crate) fn upstream_path(&self, suffix: &str) -> String {
        format!(
            "/repos/{}/{}{}",
            self.upstream_owner, self.upstream_repo, suffix
        )
    }

    /// Path of the upstream repository's copy under `owner`.
    pub(crate) fn fork_path(&self, owner: &str, suffix: &str) -> String {
        format!("/repos/{}/{}{}", owner, self.upstream_repo, suffix)
    }
}
