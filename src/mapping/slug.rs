//! URL slug derivation

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());

/// Derive a URL slug from free text.
///
/// Lower-cases, drops everything outside `[a-z0-9]`, whitespace and `-`, turns
/// whitespace runs into hyphens and collapses repeated hyphens. Non-ASCII letters
/// are dropped rather than transliterated, so a pure Cyrillic title yields `""`.
///
/// ```
/// use catalog_export::mapping::slugify;
///
/// assert_eq!(slugify("  Red Roses & Tulips! "), "red-roses-tulips");
/// assert_eq!(slugify("Розы"), "");
/// ```
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE.replace_all(stripped.trim(), "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}
