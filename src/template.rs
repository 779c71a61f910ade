//! Placeholder substitution for installer URLs and pull request titles.
//!
//! Placeholders use the `{{.Key}}` form. Substitution is literal: unknown
//! placeholders are left in the output untouched.

/// Replaces every `{{.Key}}` occurrence with its value.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_winget::template::render;
///
/// let url = render(
///     "https://example.com/app-{{.Version}}.msi",
///     &[("Version", "1.2.3")],
/// );
/// assert_eq!(url, "https://example.com/app-1.2.3.msi");
/// ```
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{{.{key}}}}}"), value)
        })
}
