//! Text normalizer
//!
//! Entity decoding, lowercasing, then the [`TextRule`] pipeline. The output
//! contains only `[a-z0-9]` runs separated by single spaces.

use crate::matcher::rules::TextRule;

/// Normalize free-form text for token comparison
///
/// Pure and total: empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    // 1. HTML/XML entities
    let decoded = html_escape::decode_html_entities(text);

    // 2. Lowercase
    let mut normalized = decoded.to_lowercase();

    // 3-5. Units, symbols, whitespace
    for rule in TextRule::PIPELINE {
        normalized = rule.apply(&normalized).into_owned();
    }

    // 6. Trim
    normalized.trim().to_string()
}
