//! Manifest generation for the community package repository.
//!
//! A publish run produces one [`ManifestSet`]: a version document, an
//! installer document and a default locale document, all sharing the same
//! identifier and version, plus the sharded directory they are committed to.

mod compiler;
mod identifier;
mod serializer;
mod settings;
mod types;

pub use compiler::compile;
pub use identifier::PackageIdentifier;
pub use serializer::header;
pub use settings::{
    DEFAULT_LOCALE, GENERATOR, MANIFEST_SCHEMA_VERSION, MANIFESTS_ROOT, ManifestSettings,
};
pub use types::{
    INSTALLER_MANIFEST_TYPE, Installer, InstallerManifest, LOCALE_MANIFEST_TYPE, LocaleManifest,
    VERSION_MANIFEST_TYPE, VersionManifest,
};

/// The three documents of one release and their target directory.
///
/// Only [`compile`] constructs a set, which keeps the identifier and version
/// consistent across all documents.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestSet {
    identifier: PackageIdentifier,
    version: VersionManifest,
    installer: InstallerManifest,
    locale: LocaleManifest,
    path: String,
    settings: ManifestSettings,
}

impl ManifestSet {
    fn new(
        identifier: PackageIdentifier,
        version: VersionManifest,
        installer: InstallerManifest,
        locale: LocaleManifest,
        path: String,
        settings: ManifestSettings,
    ) -> Self {
        Self {
            identifier,
            version,
            installer,
            locale,
            path,
            settings,
        }
    }

    /// The package identifier shared by all documents.
    pub fn identifier(&self) -> &PackageIdentifier {
        &self.identifier
    }

    /// Release version string.
    pub fn package_version(&self) -> &str {
        &self.version.package_version
    }

    pub fn version(&self) -> &VersionManifest {
        &self.version
    }

    pub fn installer(&self) -> &InstallerManifest {
        &self.installer
    }

    pub fn locale(&self) -> &LocaleManifest {
        &self.locale
    }

    /// Directory the documents are committed to, e.g. `manifests/m/MyOrg.MyApp/1.0.0`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn settings(&self) -> &ManifestSettings {
        &self.settings
    }
}
