//! Configuration for the winget publish pipeline.
//!
//! This module provides the typed configuration schema parsed from the host's
//! raw mapping, its defaulting rules, and pre-flight validation.

mod arch;
mod lenient;
mod package;
mod pull_request;
mod validate;

pub use arch::Arch;
pub use package::{
    InstallerConfig, LocaleConfig, MetadataConfig, TOKEN_ENV_VAR, WingetConfig,
};
pub use pull_request::{DEFAULT_BASE_BRANCH, DEFAULT_TITLE, PullRequestConfig};
pub use validate::{FieldError, MAX_SHORT_DESCRIPTION, validate};
