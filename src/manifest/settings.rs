//! Constants shared by every generated manifest.

/// Schema version written to `ManifestVersion` and the header schema hint.
pub const MANIFEST_SCHEMA_VERSION: &str = "1.6.0";

/// Root directory of the manifest tree in the community repository.
pub const MANIFESTS_ROOT: &str = "manifests";

/// The only locale a locale document is generated for.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Name written into the first header line.
pub const GENERATOR: &str = "kodegen";

/// Manifest generation settings.
///
/// Injected into the compiler so tests can use a different schema version
/// or repository layout without touching process state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSettings {
    /// Top-level directory of the manifest tree.
    pub root: String,
    /// Manifest schema version.
    pub schema_version: String,
    /// Locale tag of the default locale document.
    pub default_locale: String,
    /// Tool name shown in the header comment.
    pub generator: String,
}

impl Default for ManifestSettings {
    fn default() -> Self {
        Self {
            root: MANIFESTS_ROOT.to_string(),
            schema_version: MANIFEST_SCHEMA_VERSION.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
            generator: GENERATOR.to_string(),
        }
    }
}
