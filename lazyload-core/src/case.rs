//! Identifier case conversion

use once_cell::sync::Lazy;
use regex::Regex;

/// `HTMLParser` -> `HTML_Parser`
static ACRONYM_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("valid acronym regex"));

/// `recentArticles` -> `recent_Articles`
static WORD_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid word regex"));

/// Convert a PascalCase or camelCase identifier to snake_case.
///
/// Already snake_cased input passes through unchanged.
pub fn to_snake_case(ident: &str) -> String {
    let split = ACRONYM_BOUNDARY.replace_all(ident, "${1}_${2}");
    let split = WORD_BOUNDARY.replace_all(&split, "${1}_${2}");
    split.to_lowercase()
}
