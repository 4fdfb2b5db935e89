//! Similarity engine and token matcher
//!
//! Edit distance over code points, a 0-100 similarity ratio, and the
//! model/descriptive token matching rule.

use strsim::levenshtein;

use crate::matcher::tokenizer::Token;

/// Levenshtein distance over Unicode code points, cost 1 per operation
pub fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein(a, b)
}

/// Similarity ratio in `[0, 100]`
///
/// `round((len(a) + len(b) - distance) / (len(a) + len(b)) * 100)`, with
/// lengths in code points. Two empty strings are identical (100).
pub fn similarity_ratio(a: &str, b: &str) -> u8 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 100;
    }

    // distance <= max(len(a), len(b)) <= total
    let matched = total - edit_distance(a, b);

    // Integer round-half-up of matched * 100 / total
    ((matched * 200 + total) / (total * 2)) as u8
}

/// Does `token` match any whitespace-separated token of `target`?
///
/// Model tokens need exact equality. Descriptive tokens need a similarity
/// ratio of at least `threshold`.
pub fn token_matches(token: &Token, target: &str, threshold: u8) -> bool {
    let mut target_tokens = target.split_whitespace();

    if token.is_model() {
        target_tokens.any(|t| t == token.text)
    } else {
        target_tokens.any(|t| similarity_ratio(&token.text, t) >= threshold)
    }
}
