//! Windows Package Manager publisher for release pipelines
//!
//! This library publishes a release to the winget community repository:
//! - hashes each installer straight from its download URL
//! - generates the version, installer and default-locale manifests
//! - forks `microsoft/winget-pkgs`, commits the manifests to a branch and
//!   opens a pull request
//!
//! It can be used both as a CLI tool and as a release-tool plugin.

pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod hash;
pub mod manifest;
pub mod plugin;
pub mod publish;
pub mod template;

// Re-export commonly used types
pub use error::{CliError, Error, ErrorKind, Result};
pub use plugin::WingetPlugin;
pub use publish::{PublishOutcome, Publisher, Stage};
