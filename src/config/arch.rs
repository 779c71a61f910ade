//! Installer architecture tags.

/// CPU architecture accepted by the community manifest schema.
///
/// The configured tag is passed through to the installer manifest verbatim;
/// this enum only exists to validate it.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_winget::config::Arch;
///
/// assert_eq!(Arch::from_tag("x64"), Some(Arch::X64));
/// assert_eq!(Arch::from_tag("amd64"), None);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arch {
    /// 32-bit Intel
    X86,
    /// x86_64 / AMD64
    X64,
    /// 32-bit ARM
    Arm,
    /// AArch64 / ARM64
    Arm64,
}

impl Arch {
    /// All accepted tags, in the order shown to users.
    pub const TAGS: [&'static str; 4] = ["x86", "x64", "arm", "arm64"];

    /// Parses a manifest architecture tag. Matching is case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "x86" => Some(Self::X86),
            "x64" => Some(Self::X64),
            "arm" => Some(Self::Arm),
            "arm64" => Some(Self::Arm64),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_tag_parses() {
        let parsed: Vec<_> = Arch::TAGS.iter().filter_map(|t| Arch::from_tag(t)).collect();
        assert_eq!(parsed, vec![Arch::X86, Arch::X64, Arch::Arm, Arch::Arm64]);
    }

    #[test]
    fn rejects_other_spellings() {
        assert_eq!(Arch::from_tag("X64"), None);
        assert_eq!(Arch::from_tag("x86_64"), None);
        assert_eq!(Arch::from_tag(""), None);
    }
}
