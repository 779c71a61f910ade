//! Typed plugin configuration.
//!
//! The host hands over an untyped mapping; [`WingetConfig::from_value`]
//! turns it into these structs once, applying defaults, and nothing
//! downstream looks at the raw mapping again.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::{PullRequestConfig, lenient};
use crate::error::ValidationError;

/// Environment variable consulted when `github_token` is not configured.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Complete plugin configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct WingetConfig {
    /// Package identifier in `<Namespace>.<Name>` form.
    #[serde(deserialize_with = "lenient::string")]
    pub package_id: String,

    /// Access token for the hosting API.
    ///
    /// Falls back to `GITHUB_TOKEN` when empty.
    #[serde(deserialize_with = "lenient::string")]
    pub github_token: String,

    /// Installers in the order they appear in the manifest.
    #[serde(deserialize_with = "lenient::object_list")]
    pub installers: Vec<InstallerConfig>,

    /// Locale metadata shared by every release.
    #[serde(deserialize_with = "lenient::object")]
    pub metadata: MetadataConfig,

    /// Per-locale long descriptions.
    ///
    /// Only the default locale's entry is used.
    #[serde(deserialize_with = "lenient::object_list")]
    pub locales: Vec<LocaleConfig>,

    /// Pull request settings.
    #[serde(deserialize_with = "lenient::object")]
    pub pull_request: PullRequestConfig,

    /// Render manifests without hashing or submitting anything.
    #[serde(deserialize_with = "lenient::boolean")]
    pub dry_run: bool,
}

/// One configured installer.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct InstallerConfig {
    /// Download URL; may contain `{{.Version}}`.
    #[serde(deserialize_with = "lenient::string")]
    pub url: String,

    /// Architecture tag (x86, x64, arm, arm64).
    #[serde(deserialize_with = "lenient::string")]
    pub architecture: String,

    /// Installer technology, e.g. `msi`, `exe`, `inno`.
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub kind: String,

    /// Command-line switches keyed by switch kind.
    #[serde(deserialize_with = "lenient::string_map")]
    pub switches: BTreeMap<String, String>,

    /// Install scope, e.g. `user` or `machine`.
    #[serde(deserialize_with = "lenient::string")]
    pub scope: String,

    /// MSI product code.
    #[serde(deserialize_with = "lenient::string")]
    pub product_code: String,
}

/// Default-locale package metadata.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetadataConfig {
    #[serde(deserialize_with = "lenient::string")]
    pub publisher: String,
    #[serde(deserialize_with = "lenient::string")]
    pub publisher_url: String,
    #[serde(deserialize_with = "lenient::string")]
    pub publisher_support_url: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub short_description: String,
    #[serde(deserialize_with = "lenient::string")]
    pub license: String,
    #[serde(deserialize_with = "lenient::string")]
    pub license_url: String,
    #[serde(deserialize_with = "lenient::string")]
    pub copyright: String,
    #[serde(deserialize_with = "lenient::string")]
    pub package_url: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub moniker: String,
    #[serde(deserialize_with = "lenient::string")]
    pub release_notes_url: String,
}

/// Locale-specific description.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocaleConfig {
    /// BCP-47 locale tag, e.g. `en-US`.
    #[serde(deserialize_with = "lenient::string")]
    pub locale: String,
    /// Long description for this locale.
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
}

impl WingetConfig {
    /// Parses the host's raw configuration mapping.
    ///
    /// A missing (`null`) mapping yields the all-default configuration, and a
    /// root that is not a mapping is [`ValidationError::Malformed`]. Below the
    /// root a value of the wrong type counts as absent: a non-string switch or
    /// tag is dropped and a mistyped flag keeps its default. The access token
    /// falls back to the `GITHUB_TOKEN` environment variable.
    pub fn from_value(raw: &Value) -> Result<Self, ValidationError> {
        Self::from_value_with_env(raw, |key| std::env::var(key).ok())
    }

    /// Same as [`from_value`](Self::from_value) with an injectable environment lookup.
    pub fn from_value_with_env<F>(raw: &Value, env: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: WingetConfig = match raw {
            Value::Null => WingetConfig::default(),
            Value::Object(_) => {
                serde_json::from_value(raw.clone()).map_err(|e| ValidationError::Malformed {
                    reason: e.to_string(),
                })?
            }
            other => {
                return Err(ValidationError::Malformed {
                    reason: format!("expected a mapping, found {other}"),
                });
            }
        };

        if config.github_token.is_empty() {
            config.github_token = env(TOKEN_ENV_VAR).unwrap_or_default();
        }

        Ok(config)
    }

    /// Returns the description configured for `locale`, if any.
    pub fn description_for(&self, locale: &str) -> Option<&str> {
        self.locales
            .iter()
            .find(|l| l.locale == locale)
            .map(|l| l.description.as_str())
    }
}
