//! Submission of manifests to the community repository through the hosting API.

mod client;
mod endpoint;

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::config::PullRequestConfig;
use crate::error::Result;
use crate::manifest::ManifestSet;

pub use client::{GitHubClient, PR_BODY, branch_name, commit_message};
pub use endpoint::{
    API_VERSION, DEFAULT_API_BASE, FORK_SETTLE_DELAY, GitHubEndpoint, REQUEST_TIMEOUT,
    UPSTREAM_OWNER, UPSTREAM_REPO,
};

/// Operations the publish pipeline needs from the hosting service.
///
/// [`GitHubClient`] is the real implementation; the pipeline only depends on
/// this trait so it can be driven against an in-memory double.
pub trait RepositoryClient: Send + Sync {
    /// Login of the authenticated account.
    fn resolve_identity(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Makes sure a fork of the upstream repository exists and returns its owner.
    fn ensure_fork(&self, cancel: &CancellationToken) -> impl Future<Output = Result<String>> + Send;

    /// Pushes `manifests` to a new branch in the fork and opens a pull
    /// request against the upstream base branch. Returns the pull request URL.
    fn create_pull_request(
        &self,
        manifests: &ManifestSet,
        pr: &PullRequestConfig,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<String>> + Send;
}
