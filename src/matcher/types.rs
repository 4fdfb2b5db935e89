//! Matcher type definitions

use serde::Serialize;

use crate::dictionary::DictionaryEntry;
use crate::matcher::normalizer::normalize;
use crate::matcher::tokenizer::{Token, Tokenizer};

/// Per-request query
#[derive(Debug, Clone)]
pub struct Query {
    /// Raw input text
    pub raw: String,
    /// Normalized text
    pub normalized: String,
    /// Tokens of the normalized text, in order
    pub tokens: Vec<Token>,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        let normalized = normalize(raw);
        let tokens = Tokenizer::tokenize(&normalized);
        Self {
            raw: raw.to_string(),
            normalized,
            tokens,
        }
    }
}

/// Catalog attributes of the chosen entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedProduct {
    pub product: String,
    pub brand: String,
    pub category: String,
}

impl From<&DictionaryEntry> for MatchedProduct {
    fn from(entry: &DictionaryEntry) -> Self {
        Self {
            product: entry.product().to_string(),
            brand: entry.brand().to_string(),
            category: entry.category().to_string(),
        }
    }
}

/// Match result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchResult {
    /// No dictionary entry is consistent with the query
    NoMatch,
    /// Best-scoring candidate among a small candidate set
    MatchedFuzzyMax(MatchedProduct),
    /// Elimination left too many candidates to decide
    #[serde(rename = "unmatched_too_many_candidates")]
    TooManyCandidates,
}

impl MatchResult {
    /// Stable status tag
    pub fn status(&self) -> &'static str {
        match self {
            MatchResult::NoMatch => "no_match",
            MatchResult::MatchedFuzzyMax(_) => "matched_fuzzy_max",
            MatchResult::TooManyCandidates => "unmatched_too_many_candidates",
        }
    }

    pub fn matched(&self) -> Option<&MatchedProduct> {
        match self {
            MatchResult::MatchedFuzzyMax(product) => Some(product),
            _ => None,
        }
    }
}
