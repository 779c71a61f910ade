//! Error types for the publish pipeline.
//!
//! Every stage of a publish run fails fast with one of four categories:
//! validation, transfer, composition, or remote API. The CLI adds its own
//! errors on top for argument and config-file problems.

use thiserror::Error;

/// Result type alias for publish operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error category, used by callers that only care about which stage failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration or identifier problem caught before any network activity
    Validation,
    /// Installer download or hashing failure
    Transfer,
    /// Manifest synthesis or serialization failure
    Composition,
    /// Non-success response from the hosting REST API
    RemoteApi,
    /// Command line or local file problem
    Cli,
}

/// Main error type for all publish operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration and identifier errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Download and hashing errors
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// Manifest generation errors
    #[error(transparent)]
    Composition(#[from] CompositionError),

    /// Hosting API errors
    #[error(transparent)]
    RemoteApi(#[from] RemoteApiError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),
}

impl Error {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Transfer(_) => ErrorKind::Transfer,
            Error::Composition(_) => ErrorKind::Composition,
            Error::RemoteApi(_) => ErrorKind::RemoteApi,
            Error::Cli(_) => ErrorKind::Cli,
        }
    }
}

/// Errors detected before any network activity.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Package identifier is not `<Namespace>.<Name>`
    #[error("invalid package ID format: {identifier}")]
    InvalidIdentifier {
        /// The rejected identifier
        identifier: String,
    },

    /// A required configuration value is missing
    #[error("missing required configuration: {field}")]
    MissingField {
        /// Field path, e.g. `github_token`
        field: String,
    },

    /// The raw configuration mapping does not match the schema
    #[error("malformed configuration: {reason}")]
    Malformed {
        /// Deserializer message
        reason: String,
    },
}

/// Errors raised while downloading and hashing an installer.
#[derive(Error, Debug)]
pub enum TransferError {
    /// The download client could not be initialised
    #[error("failed to initialise download client: {source}")]
    Client {
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// The request could not be sent or the connection failed
    #[error("failed to download installer from {url}: {source}")]
    Request {
        /// Installer URL
        url: String,
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("download of {url} failed with status {status}")]
    Status {
        /// Installer URL
        url: String,
        /// Observed HTTP status code
        status: u16,
    },

    /// The redirect chain exceeded the hard cap
    #[error("too many redirects while downloading {url}")]
    TooManyRedirects {
        /// Installer URL
        url: String,
    },

    /// The download did not finish within the transfer timeout
    #[error("download of {url} timed out")]
    Timeout {
        /// Installer URL
        url: String,
    },

    /// The caller cancelled the download
    #[error("download of {url} was cancelled")]
    Cancelled {
        /// Installer URL
        url: String,
    },
}

/// Errors raised while building or rendering manifest documents.
#[derive(Error, Debug)]
pub enum CompositionError {
    /// YAML encoding failed for one of the documents
    #[error("failed to generate {document} manifest: {source}")]
    Serialize {
        /// Document name (version, installer, locale)
        document: &'static str,
        /// Encoder error
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors returned by the hosting REST API client.
///
/// Every variant carries the name of the step that failed so a partially
/// completed submission can be diagnosed from the message alone.
#[derive(Error, Debug)]
pub enum RemoteApiError {
    /// The API client could not be initialised
    #[error("failed to initialise API client: {source}")]
    Client {
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with an unexpected status
    #[error("{step}: API error {status}: {body}")]
    Status {
        /// Pipeline step
        step: String,
        /// HTTP status code
        status: u16,
        /// Truncated response body
        body: String,
    },

    /// The request could not be sent
    #[error("{step}: request failed: {source}")]
    Transport {
        /// Pipeline step
        step: String,
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be decoded
    #[error("{step}: failed to decode response: {source}")]
    Decode {
        /// Pipeline step
        step: String,
        /// Underlying decode error
        #[source]
        source: reqwest::Error,
    },

    /// The caller cancelled the request
    #[error("{step}: cancelled")]
    Cancelled {
        /// Pipeline step
        step: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Config file could not be read or parsed
    #[error("Failed to load config {path}: {reason}")]
    ConfigFile {
        /// Path to the config file
        path: String,
        /// Reason for the error
        reason: String,
    },

    /// Writing to the terminal failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
