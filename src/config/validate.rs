//! Pre-flight configuration checks.
//!
//! Runs without touching the network and reports every problem at once,
//! keyed by the configuration path that caused it.

use serde::Serialize;

use super::{Arch, WingetConfig};
use crate::manifest::PackageIdentifier;

/// Maximum length of the short description accepted by the manifest schema.
pub const MAX_SHORT_DESCRIPTION: usize = 256;

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Configuration path, e.g. `installers[0].url`
    pub field: String,
    /// Human-readable explanation
    pub message: String,
}

impl FieldError {
    pub(crate) fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Checks a parsed configuration and returns every problem found.
///
/// An empty vector means the configuration is ready to publish.
pub fn validate(config: &WingetConfig) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if PackageIdentifier::parse(&config.package_id).is_err() {
        errors.push(FieldError::new(
            "package_id",
            "Package ID must be in format Publisher.PackageName",
        ));
    }

    if config.github_token.is_empty() {
        errors.push(FieldError::new("github_token", "GitHub token is required"));
    }

    if config.installers.is_empty() {
        errors.push(FieldError::new(
            "installers",
            "At least one installer is required",
        ));
    }

    for (i, installer) in config.installers.iter().enumerate() {
        if installer.url.is_empty() {
            errors.push(FieldError::new(
                format!("installers[{i}].url"),
                "Installer URL is required",
            ));
        } else if !is_url_template(&installer.url) {
            errors.push(FieldError::new(
                format!("installers[{i}].url"),
                "Installer URL must be an absolute http(s) URL",
            ));
        }
        if Arch::from_tag(&installer.architecture).is_none() {
            errors.push(FieldError::new(
                format!("installers[{i}].architecture"),
                format!("Architecture must be one of {}", Arch::TAGS.join(", ")),
            ));
        }
    }

    let metadata = &config.metadata;
    if metadata.publisher.is_empty() {
        errors.push(FieldError::new("metadata.publisher", "Publisher is required"));
    }
    if metadata.name.is_empty() {
        errors.push(FieldError::new("metadata.name", "Package name is required"));
    }
    if metadata.short_description.is_empty() {
        errors.push(FieldError::new(
            "metadata.short_description",
            "Short description is required",
        ));
    } else if metadata.short_description.chars().count() > MAX_SHORT_DESCRIPTION {
        errors.push(FieldError::new(
            "metadata.short_description",
            format!("Short description must be <= {MAX_SHORT_DESCRIPTION} characters"),
        ));
    }
    if metadata.license.is_empty() {
        errors.push(FieldError::new("metadata.license", "License is required"));
    }

    errors
}

/// Accepts URLs whose scheme is http or https once the version placeholder
/// is filled in with a dummy value.
fn is_url_template(template: &str) -> bool {
    let sample = crate::template::render(template, &[("Version", "0.0.0")]);
    url::Url::parse(&sample)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}
