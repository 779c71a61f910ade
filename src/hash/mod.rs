//! Installer digest calculation.
//!
//! This module provides SHA256 digests for installers, either streamed from
//! their download URL or computed from an in-memory buffer. Digests are
//! rendered as 64 uppercase hex characters, which is the form the manifest
//! schema expects in `InstallerSha256`.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, redirect};
use sha2::{Digest, Sha256};
use tokio_util::sync::CancellationToken;

use crate::error::TransferError;

/// Maximum number of redirects followed before a download is abandoned.
pub const MAX_REDIRECTS: usize = 10;

/// Upper bound for a whole installer download, including redirects.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Digest used in place of a real one when nothing is downloaded.
pub const DRY_RUN_DIGEST: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

const USER_AGENT: &str = concat!("kodegen-bundler-winget/", env!("CARGO_PKG_VERSION"));

/// Calculates the uppercase hex SHA256 digest of a byte buffer.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_winget::hash::digest_bytes;
///
/// assert_eq!(
///     digest_bytes(b""),
///     "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855"
/// );
/// ```
pub fn digest_bytes(data: &[u8]) -> String {
    hex::encode_upper(Sha256::digest(data))
}

/// Downloads installers and hashes them as they stream in.
///
/// Nothing is cached and failed downloads are never retried.
#[derive(Debug, Clone)]
pub struct InstallerHasher {
    client: Client,
}

impl InstallerHasher {
    /// Creates a hasher with the default [`DOWNLOAD_TIMEOUT`].
    pub fn new() -> Result<Self, TransferError> {
        Self::with_timeout(DOWNLOAD_TIMEOUT)
    }

    /// Creates a hasher whose downloads are bounded by `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransferError> {
        let client = Client::builder()
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| TransferError::Client { source })?;

        Ok(Self { client })
    }

    /// Downloads `url` and returns the digest of its body.
    ///
    /// Reads the body chunk by chunk so large installers are never held in
    /// memory. Non-2xx responses, more than [`MAX_REDIRECTS`] redirects, a
    /// timeout, or cancellation through `cancel` all end the download with an
    /// error.
    pub async fn hash_url(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<String, TransferError> {
        log::debug!("Downloading installer {}", url);

        let mut response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TransferError::Cancelled { url: url.to_string() }),
            sent = self.client.get(url).send() => sent.map_err(|e| classify(url, e))?,
        };

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut hasher = Sha256::new();
        let mut total = 0u64;

        loop {
            let chunk = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(TransferError::Cancelled { url: url.to_string() }),
                chunk = response.chunk() => chunk.map_err(|e| classify(url, e))?,
            };
            match chunk {
                Some(bytes) => {
                    total += bytes.len() as u64;
                    hasher.update(&bytes);
                }
                None => break,
            }
        }

        log::debug!("Hashed {} bytes from {}", total, url);
        Ok(hex::encode_upper(hasher.finalize()))
    }
}

/// Source of installer digests used by the publish pipeline.
pub trait DigestSource: Send + Sync {
    /// Returns the uppercase hex SHA256 digest of the resource at `url`.
    fn digest(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<String, TransferError>> + Send;
}

impl DigestSource for InstallerHasher {
    async fn digest(&self, url: &str, cancel: &CancellationToken) -> Result<String, TransferError> {
        self.hash_url(url, cancel).await
    }
}

fn classify(url: &str, error: reqwest::Error) -> TransferError {
    let url = url.to_string();
    if error.is_redirect() {
        TransferError::TooManyRedirects { url }
    } else if error.is_timeout() {
        TransferError::Timeout { url }
    } else {
        TransferError::Request { url, source: error }
    }
}
