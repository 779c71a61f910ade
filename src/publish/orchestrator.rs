//! The publish pipeline.
//!
//! This module provides the [`Publisher`] that drives one release through
//! hashing, manifest composition and either dry-run reporting or pull
//! request submission. Every failure ends the run at once and is reported
//! through [`PublishOutcome`]; nothing is retried or rolled back.

use tokio_util::sync::CancellationToken;

use super::Stage;
use crate::config::WingetConfig;
use crate::error::{Error, ErrorKind, ValidationError};
use crate::github::RepositoryClient;
use crate::hash::{DRY_RUN_DIGEST, DigestSource};
use crate::manifest::{Installer, ManifestSettings, PackageIdentifier, compile};
use crate::template;

/// Result of a publish run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Whether the run reached [`Stage::Done`].
    pub success: bool,
    /// Human-readable summary, suitable for showing to the operator.
    pub message: String,
    /// URL of the opened pull request, for live runs that succeeded.
    pub pr_url: Option<String>,
    /// Category of the error that ended a failed run.
    pub error: Option<ErrorKind>,
    /// Every stage the run passed through, ending in `Done` or `Failed`.
    pub stages: Vec<Stage>,
}

impl PublishOutcome {
    /// The stage that was running when the run failed.
    pub fn failed_at(&self) -> Option<Stage> {
        match self.stages.as_slice() {
            [.., last, Stage::Failed] => Some(*last),
            _ => None,
        }
    }
}

/// Stage bookkeeping for one run.
struct Run {
    stages: Vec<Stage>,
}

impl Run {
    fn start() -> Self {
        Self {
            stages: vec![Stage::Idle],
        }
    }

    fn current(&self) -> Stage {
        self.stages.last().copied().unwrap_or(Stage::Idle)
    }

    fn advance(&mut self, next: Stage) {
        debug_assert!(
            self.current().can_advance_to(next),
            "illegal transition {} -> {}",
            self.current(),
            next
        );
        log::debug!("Publish stage: {} -> {}", self.current(), next);
        self.stages.push(next);
    }

    fn fail(mut self, message: String, error: Error) -> PublishOutcome {
        log::error!("Publish failed during {}: {}", self.current(), message);
        let kind = error.kind();
        self.advance(Stage::Failed);
        PublishOutcome {
            success: false,
            message,
            pr_url: None,
            error: Some(kind),
            stages: self.stages,
        }
    }

    fn succeed(mut self, message: String, pr_url: Option<String>) -> PublishOutcome {
        self.advance(Stage::Done);
        PublishOutcome {
            success: true,
            message,
            pr_url,
            error: None,
            stages: self.stages,
        }
    }
}

/// Drives a release through the publish pipeline.
///
/// Generic over where digests come from and how the hosting service is
/// reached, so the whole sequence can run against in-memory doubles.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_winget::config::WingetConfig;
/// use kodegen_bundler_winget::github::{GitHubClient, GitHubEndpoint};
/// use kodegen_bundler_winget::hash::InstallerHasher;
/// use kodegen_bundler_winget::manifest::ManifestSettings;
/// use kodegen_bundler_winget::publish::Publisher;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example(config: WingetConfig) -> kodegen_bundler_winget::Result<()> {
/// let publisher = Publisher::new(
///     InstallerHasher::new()?,
///     GitHubClient::new(&config.github_token, None, GitHubEndpoint::default())?,
///     ManifestSettings::default(),
/// );
/// let outcome = publisher
///     .publish(&config, "1.0.0", false, &CancellationToken::new())
///     .await;
/// println!("{}", outcome.message);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Publisher<D, R> {
    digests: D,
    repository: R,
    settings: ManifestSettings,
}

impl<D: DigestSource, R: RepositoryClient> Publisher<D, R> {
    pub fn new(digests: D, repository: R, settings: ManifestSettings) -> Self {
        Self {
            digests,
            repository,
            settings,
        }
    }

    /// Publishes `version` of the configured package.
    ///
    /// With `dry_run` set nothing is downloaded and nothing is sent to the
    /// hosting service; the rendered documents are logged instead.
    pub async fn publish(
        &self,
        config: &WingetConfig,
        version: &str,
        dry_run: bool,
        cancel: &CancellationToken,
    ) -> PublishOutcome {
        let mut run = Run::start();
        let package_id = config.package_id.as_str();

        // Checks that need no network, so a bad config never reaches a server.
        if let Err(err) = PackageIdentifier::parse(package_id) {
            return run.fail(format!("Failed to generate manifests: {err}"), err.into());
        }
        if !dry_run && config.github_token.is_empty() {
            let err = ValidationError::MissingField {
                field: "github_token".to_string(),
            };
            return run.fail(format!("Failed to ensure fork: {err}"), err.into());
        }

        run.advance(Stage::HashingInstallers);
        log::info!("Calculating installer hashes for {} {}", package_id, version);
        let mut installers = Vec::with_capacity(config.installers.len());
        for (index, spec) in config.installers.iter().enumerate() {
            let url = template::render(&spec.url, &[("Version", version)]);
            log::info!(
                "Processing installer {} ({}): {}",
                index,
                spec.architecture,
                url
            );

            let digest = if dry_run {
                log::info!("[DRY-RUN] Would download and hash installer");
                DRY_RUN_DIGEST.to_string()
            } else {
                match self.digests.digest(&url, cancel).await {
                    Ok(digest) => digest,
                    Err(err) => {
                        return run.fail(
                            format!("Failed to calculate hash for installer {index}: {err}"),
                            err.into(),
                        );
                    }
                }
            };
            installers.push(Installer::resolve(spec, url, digest));
        }

        run.advance(Stage::ComposingManifests);
        log::info!("Generating manifests");
        let manifests = match compile(config, version, installers, &self.settings) {
            Ok(manifests) => manifests,
            Err(err) => {
                return run.fail(format!("Failed to generate manifests: {err}"), err.into());
            }
        };

        if dry_run {
            run.advance(Stage::DryRunReporting);
            let files = match manifests.files() {
                Ok(files) => files,
                Err(err) => {
                    return run.fail(format!("Failed to generate manifests: {err}"), err.into());
                }
            };
            log::info!(
                "[DRY-RUN] Generated {} manifests under {} ({} installers)",
                files.len(),
                manifests.path(),
                manifests.installer().installers.len()
            );
            for (path, content) in &files {
                log::info!("[DRY-RUN] {}\n{}", path, content);
            }
            return run.succeed(
                format!("[DRY-RUN] Would create PR for {package_id} version {version}"),
                None,
            );
        }

        run.advance(Stage::SubmittingPr);
        log::info!("Ensuring fork of the manifest repository exists");
        let owner = match self.repository.ensure_fork(cancel).await {
            Ok(owner) => owner,
            Err(err) => return run.fail(format!("Failed to ensure fork: {err}"), err),
        };
        log::info!("Using fork owned by {}", owner);

        let url = match self
            .repository
            .create_pull_request(&manifests, &config.pull_request, cancel)
            .await
        {
            Ok(url) => url,
            Err(err) => return run.fail(format!("Failed to create PR: {err}"), err),
        };

        run.succeed(
            format!("Created PR for {package_id} version {version}: {url}"),
            Some(url),
        )
    }
}
