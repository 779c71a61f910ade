//! Package identifier parsing.

use crate::error::ValidationError;

/// A validated `<Namespace>.<Name>` package identifier.
///
/// The identifier is split once, on the first `.`: everything after it is
/// the name, dots included. Both halves are guaranteed non-empty.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_winget::manifest::PackageIdentifier;
///
/// let id = PackageIdentifier::parse("Microsoft.VisualStudio.Code").unwrap();
/// assert_eq!(id.namespace(), "Microsoft");
/// assert_eq!(id.name(), "VisualStudio.Code");
/// assert_eq!(id.shard(), "m");
///
/// assert!(PackageIdentifier::parse("NoSeparator").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIdentifier {
    full: String,
    split: usize,
}

impl PackageIdentifier {
    /// Separator between namespace and name.
    pub const SEPARATOR: char = '.';

    /// Parses and validates an identifier.
    pub fn parse(identifier: &str) -> Result<Self, ValidationError> {
        match identifier.split_once(Self::SEPARATOR) {
            Some((namespace, name)) if !namespace.is_empty() && !name.is_empty() => Ok(Self {
                full: identifier.to_string(),
                split: namespace.len(),
            }),
            _ => Err(ValidationError::InvalidIdentifier {
                identifier: identifier.to_string(),
            }),
        }
    }

    /// The full identifier as configured.
    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// Everything before the first separator.
    pub fn namespace(&self) -> &str {
        &self.full[..self.split]
    }

    /// Everything after the first separator.
    pub fn name(&self) -> &str {
        &self.full[self.split + 1..]
    }

    /// Lowercased first character of the namespace.
    ///
    /// The community repository shards its `manifests/` tree by this value.
    pub fn shard(&self) -> String {
        self.namespace()
            .chars()
            .next()
            .map(|c| c.to_lowercase().collect())
            .unwrap_or_default()
    }

    /// The identifier with every separator replaced by `-`, for branch names.
    pub fn branch_segment(&self) -> String {
        self.full.replace(Self::SEPARATOR, "-")
    }
}

impl std::fmt::Display for PackageIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}
