//! YAML rendering of a [`ManifestSet`].

use std::collections::BTreeMap;

use serde::Serialize;

use super::{ManifestSet, ManifestSettings, VERSION_MANIFEST_TYPE};
use crate::error::CompositionError;

/// The two-line comment every emitted document starts with, plus a blank line.
///
/// The text is the same for all three documents and points at the version
/// schema.
pub fn header(settings: &ManifestSettings) -> String {
    format!(
        "# Created using {}\n# yaml-language-server: $schema=https://aka.ms/winget-manifest.{}.{}.schema.json\n\n",
        settings.generator, VERSION_MANIFEST_TYPE, settings.schema_version
    )
}

fn render<T: Serialize>(
    document: &'static str,
    value: &T,
    settings: &ManifestSettings,
) -> Result<String, CompositionError> {
    let body = serde_yaml::to_string(value)
        .map_err(|source| CompositionError::Serialize { document, source })?;
    Ok(header(settings) + &body)
}

impl ManifestSet {
    /// The version document with its header.
    pub fn version_yaml(&self) -> Result<String, CompositionError> {
        render("version", self.version(), self.settings())
    }

    /// The installer document with its header.
    pub fn installer_yaml(&self) -> Result<String, CompositionError> {
        render("installer", self.installer(), self.settings())
    }

    /// The default locale document with its header.
    pub fn locale_yaml(&self) -> Result<String, CompositionError> {
        render("locale", self.locale(), self.settings())
    }

    /// All three rendered documents keyed by their repository path.
    ///
    /// Keys are `<path>/<Id>.yaml`, `<path>/<Id>.installer.yaml` and
    /// `<path>/<Id>.locale.<locale>.yaml`. The map is ordered, so callers that
    /// commit one file per request do so in a stable order.
    pub fn files(&self) -> Result<BTreeMap<String, String>, CompositionError> {
        let prefix = self.path();
        let id = self.identifier().as_str();
        let locale = &self.locale().package_locale;

        let mut files = BTreeMap::new();
        files.insert(format!("{prefix}/{id}.yaml"), self.version_yaml()?);
        files.insert(
            format!("{prefix}/{id}.installer.yaml"),
            self.installer_yaml()?,
        );
        files.insert(
            format!("{prefix}/{id}.locale.{locale}.yaml"),
            self.locale_yaml()?,
        );
        Ok(files)
    }
}
