//! Manifest document types.
//!
//! Field names and the omit-if-empty rules are fixed by the community
//! manifest schema; serde renames produce the schema's PascalCase keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::InstallerConfig;

/// `ManifestType` of the version document.
pub const VERSION_MANIFEST_TYPE: &str = "version";
/// `ManifestType` of the installer document.
pub const INSTALLER_MANIFEST_TYPE: &str = "installer";
/// `ManifestType` of the default locale document.
pub const LOCALE_MANIFEST_TYPE: &str = "defaultLocale";

/// The version manifest (`<Id>.yaml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VersionManifest {
    pub package_identifier: String,
    pub package_version: String,
    pub default_locale: String,
    pub manifest_type: String,
    pub manifest_version: String,
}

/// The installer manifest (`<Id>.installer.yaml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstallerManifest {
    pub package_identifier: String,
    pub package_version: String,
    pub installers: Vec<Installer>,
    pub manifest_type: String,
    pub manifest_version: String,
}

/// A single installer entry with its version-resolved URL and digest.
///
/// Built once per publish run and only ever stored inside an
/// [`InstallerManifest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Installer {
    pub architecture: String,
    pub installer_type: String,
    pub installer_url: String,
    pub installer_sha256: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub installer_switches: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
}

impl Installer {
    /// Resolves a configured installer against a concrete URL and digest.
    ///
    /// `url` is the configured template with the version already substituted.
    pub fn resolve(spec: &InstallerConfig, url: String, sha256: String) -> Self {
        Self {
            architecture: spec.architecture.clone(),
            installer_type: spec.kind.clone(),
            installer_url: url,
            installer_sha256: sha256,
            scope: non_empty(&spec.scope),
            installer_switches: spec.switches.clone(),
            product_code: non_empty(&spec.product_code),
        }
    }
}

/// The default locale manifest (`<Id>.locale.<locale>.yaml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocaleManifest {
    pub package_identifier: String,
    pub package_version: String,
    pub package_locale: String,
    pub publisher: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_support_url: Option<String>,
    pub package_name: String,
    pub license: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    pub short_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moniker: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_notes_url: Option<String>,
    pub manifest_type: String,
    pub manifest_version: String,
}

/// Maps an empty configured value to `None` so it is left out of the document.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
