//! Manifest synthesis.
//!
//! Turns the typed configuration, a release version and the resolved
//! installers into a [`ManifestSet`]. No I/O happens here and the output is
//! fully determined by the inputs.

use super::{
    INSTALLER_MANIFEST_TYPE, Installer, InstallerManifest, LOCALE_MANIFEST_TYPE, LocaleManifest,
    ManifestSet, ManifestSettings, PackageIdentifier, VERSION_MANIFEST_TYPE, VersionManifest,
    types::non_empty,
};
use crate::config::WingetConfig;
use crate::error::ValidationError;

/// Builds the three manifest documents for one release.
///
/// Fails only when the package identifier is not `<Namespace>.<Name>`; in
/// that case nothing is built.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_winget::config::WingetConfig;
/// use kodegen_bundler_winget::manifest::{compile, ManifestSettings};
///
/// let config = WingetConfig {
///     package_id: "MyOrg.MyApp".into(),
///     ..Default::default()
/// };
/// let set = compile(&config, "1.0.0", Vec::new(), &ManifestSettings::default()).unwrap();
/// assert_eq!(set.path(), "manifests/m/MyOrg.MyApp/1.0.0");
/// ```
pub fn compile(
    config: &WingetConfig,
    version: &str,
    installers: Vec<Installer>,
    settings: &ManifestSettings,
) -> Result<ManifestSet, ValidationError> {
    let identifier = PackageIdentifier::parse(&config.package_id)?;
    let id = identifier.as_str().to_string();
    let schema = settings.schema_version.clone();

    let version_manifest = VersionManifest {
        package_identifier: id.clone(),
        package_version: version.to_string(),
        default_locale: settings.default_locale.clone(),
        manifest_type: VERSION_MANIFEST_TYPE.to_string(),
        manifest_version: schema.clone(),
    };

    let installer_manifest = InstallerManifest {
        package_identifier: id.clone(),
        package_version: version.to_string(),
        installers,
        manifest_type: INSTALLER_MANIFEST_TYPE.to_string(),
        manifest_version: schema.clone(),
    };

    let meta = &config.metadata;
    let locale_manifest = LocaleManifest {
        package_identifier: id,
        package_version: version.to_string(),
        package_locale: settings.default_locale.clone(),
        publisher: meta.publisher.clone(),
        publisher_url: non_empty(&meta.publisher_url),
        publisher_support_url: non_empty(&meta.publisher_support_url),
        package_name: meta.name.clone(),
        license: meta.license.clone(),
        license_url: non_empty(&meta.license_url),
        copyright: non_empty(&meta.copyright),
        short_description: meta.short_description.clone(),
        description: config
            .description_for(&settings.default_locale)
            .and_then(non_empty),
        moniker: non_empty(&meta.moniker),
        tags: meta.tags.clone(),
        package_url: non_empty(&meta.package_url),
        release_notes_url: non_empty(&meta.release_notes_url),
        manifest_type: LOCALE_MANIFEST_TYPE.to_string(),
        manifest_version: schema,
    };

    let path = format!(
        "{}/{}/{}/{}",
        settings.root,
        identifier.shard(),
        identifier.as_str(),
        version
    );

    Ok(ManifestSet::new(
        identifier,
        version_manifest,
        installer_manifest,
        locale_manifest,
        path,
        settings.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LocaleConfig, MetadataConfig};

    fn config() -> WingetConfig {
        WingetConfig {
            package_id: "MyOrg.MyApp".into(),
            metadata: MetadataConfig {
                publisher: "My Organization".into(),
                publisher_url: "https://myorg.com".into(),
                name: "My Application".into(),
                short_description: "A useful application".into(),
                license: "MIT".into(),
                license_url: "https://github.com/myorg/myapp/LICENSE".into(),
                moniker: "myapp".into(),
                tags: vec!["utility".into(), "productivity".into()],
                ..Default::default()
            },
            locales: vec![
                LocaleConfig {
                    locale: "de-DE".into(),
                    description: "Eine Anwendung".into(),
                },
                LocaleConfig {
                    locale: "en-US".into(),
                    description: "A full description of the application".into(),
                },
            ],
            ..Default::default()
        }
    }

    fn installers() -> Vec<Installer> {
        vec![Installer {
            architecture: "x64".into(),
            installer_type: "msi".into(),
            installer_url: "https://example.com/myapp-1.0.0-x64.msi".into(),
            installer_sha256: "ABC123".into(),
            scope: None,
            installer_switches: Default::default(),
            product_code: None,
        }]
    }

    #[test]
    fn builds_all_three_documents() {
        let set = compile(&config(), "1.0.0", installers(), &ManifestSettings::default()).unwrap();

        assert_eq!(set.version().package_identifier, "MyOrg.MyApp");
        assert_eq!(set.version().package_version, "1.0.0");
        assert_eq!(set.version().default_locale, "en-US");
        assert_eq!(set.version().manifest_type, "version");
        assert_eq!(set.version().manifest_version, "1.6.0");

        assert_eq!(set.installer().installers.len(), 1);
        assert_eq!(set.installer().manifest_type, "installer");

        let locale = set.locale();
        assert_eq!(locale.publisher, "My Organization");
        assert_eq!(locale.package_name, "My Application");
        assert_eq!(locale.license, "MIT");
        assert_eq!(locale.short_description, "A useful application");
        assert_eq!(
            locale.description.as_deref(),
            Some("A full description of the application")
        );
        assert_eq!(locale.manifest_type, "defaultLocale");
        assert_eq!(locale.copyright, None);

        assert_eq!(set.path(), "manifests/m/MyOrg.MyApp/1.0.0");
    }

    #[test]
    fn identity_fields_agree_across_documents() {
        let set = compile(&config(), "2.3.4", installers(), &ManifestSettings::default()).unwrap();
        let id = &set.version().package_identifier;
        let version = &set.version().package_version;

        assert_eq!(&set.installer().package_identifier, id);
        assert_eq!(&set.locale().package_identifier, id);
        assert_eq!(&set.installer().package_version, version);
        assert_eq!(&set.locale().package_version, version);
    }

    #[test]
    fn repeated_compilation_is_identical() {
        let settings = ManifestSettings::default();
        let a = compile(&config(), "1.0.0", installers(), &settings).unwrap();
        let b = compile(&config(), "1.0.0", installers(), &settings).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.files().unwrap(), b.files().unwrap());
    }

    #[test]
    fn rejects_identifier_without_separator() {
        let mut cfg = config();
        cfg.package_id = "InvalidPackageID".into();
        let err = compile(&cfg, "1.0.0", installers(), &ManifestSettings::default()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidIdentifier { .. }));
    }

    #[test]
    fn other_locales_do_not_fill_description() {
        let mut cfg = config();
        cfg.locales.retain(|l| l.locale != "en-US");
        let set = compile(&cfg, "1.0.0", installers(), &ManifestSettings::default()).unwrap();
        assert_eq!(set.locale().description, None);
    }

    #[test]
    fn honours_injected_settings() {
        let settings = ManifestSettings {
            root: "staging".into(),
            schema_version: "1.9.0".into(),
            ..Default::default()
        };
        let set = compile(&config(), "1.0.0", installers(), &settings).unwrap();
        assert_eq!(set.path(), "staging/m/MyOrg.MyApp/1.0.0");
        assert_eq!(set.locale().manifest_version, "1.9.0");
    }

    #[test]
    fn preserves_installer_order() {
        let mut list = installers();
        let mut arm = list[0].clone();
        arm.architecture = "arm64".into();
        list.insert(0, arm);

        let set = compile(&config(), "1.0.0", list, &ManifestSettings::default()).unwrap();
        let archs: Vec<_> = set
            .installer()
            .installers
            .iter()
            .map(|i| i.architecture.as_str())
            .collect();
        assert_eq!(archs, vec!["arm64", "x64"]);
    }
}
