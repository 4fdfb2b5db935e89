//! Matching rules
//!
//! Precompiled text-scanning rules used by the normalizer and tokenizer, plus
//! the numeric policy the engine applies.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Minimum similarity ratio for a descriptive token to match a target token
pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 90;

/// Candidate count at or above which the result is reported as ambiguous
pub const DEFAULT_MAX_FUZZY_CANDIDATES: usize = 10;

/// Units stripped when glued to a number (`64gb`, `120hz`, `5000mah`)
///
/// storage, refresh rate, battery, frame rate, camera resolution
pub const TECH_UNITS: &[&str] = &["gb", "tb", "hz", "mah", "fps", "mp"];

lazy_static! {
    /// Maximal run of ASCII letters and digits. Word boundaries for unit
    /// stripping are the edges of these runs.
    static ref WORD_RUN: Regex = Regex::new(r"[a-z0-9]+").expect("word run pattern");

    /// A whole run made of digits followed by a known unit
    static ref TECH_UNIT: Regex =
        Regex::new(&format!(r"^[0-9]+(?:{})$", TECH_UNITS.join("|"))).expect("tech unit pattern");

    /// Anything that is not a lowercase letter, digit or whitespace
    static ref SYMBOL: Regex = Regex::new(r"[^a-z0-9\s]").expect("symbol pattern");

    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("whitespace pattern");

    /// Letters immediately followed by digits, anchored at the token start
    pub(crate) static ref MODEL_TOKEN: Regex = Regex::new(r"^[a-z]+[0-9]+").expect("model token pattern");
}

/// One step of the normalization pipeline
///
/// Every rule expects already lowercased input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRule {
    /// Replace `<digits><unit>` runs with a space
    StripTechUnits,
    /// Replace punctuation and symbols with a space
    ReplaceSymbols,
    /// Collapse whitespace runs into a single space
    CollapseWhitespace,
}

impl TextRule {
    /// Rules in the order the normalizer applies them
    pub const PIPELINE: [TextRule; 3] = [
        TextRule::StripTechUnits,
        TextRule::ReplaceSymbols,
        TextRule::CollapseWhitespace,
    ];

    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self {
            TextRule::StripTechUnits => WORD_RUN.replace_all(text, |caps: &Captures| {
                let run = &caps[0];
                if TECH_UNIT.is_match(run) {
                    " ".to_string()
                } else {
                    run.to_string()
                }
            }),
            TextRule::ReplaceSymbols => SYMBOL.replace_all(text, " "),
            TextRule::CollapseWhitespace => WHITESPACE.replace_all(text, " "),
        }
    }
}

/// Numeric policy of the matching engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPolicy {
    /// Ratio (0-100) a descriptive token needs to match a target token
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: u8,
    /// Candidate count at or above which scoring is skipped
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

fn default_similarity_threshold() -> u8 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_max_candidates() -> usize {
    DEFAULT_MAX_FUZZY_CANDIDATES
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            max_candidates: default_max_candidates(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tech_units() {
        let rule = TextRule::StripTechUnits;
        assert_eq!(rule.apply("galaxy 128gb 120hz").trim_end(), "galaxy");
        assert_eq!(rule.apply("5000mah battery"), "  battery");
        assert_eq!(rule.apply("12mp 60fps 2tb"), "     ");
    }

    #[test]
    fn test_strip_tech_units_needs_whole_run() {
        let rule = TextRule::StripTechUnits;
        // glued to a letter: not a standalone unit number
        assert_eq!(rule.apply("x64gb"), "x64gb");
        assert_eq!(rule.apply("64gbs"), "64gbs");
        assert_eq!(rule.apply("gb"), "gb");
        // punctuation is a boundary
        assert_eq!(rule.apply("64gb/128gb"), " / ");
    }

    #[test]
    fn test_replace_symbols() {
        let rule = TextRule::ReplaceSymbols;
        assert_eq!(rule.apply("wi-fi (2nd gen)!"), "wi fi  2nd gen  ");
        assert_eq!(rule.apply("café"), "caf ");
    }

    #[test]
    fn test_collapse_whitespace() {
        let rule = TextRule::CollapseWhitespace;
        assert_eq!(rule.apply("a  \t b\n\nc"), "a b c");
    }

    #[test]
    fn test_model_token_pattern() {
        assert!(MODEL_TOKEN.is_match("s21"));
        assert!(MODEL_TOKEN.is_match("rtx4090ti"));
        assert!(!MODEL_TOKEN.is_match("13"));
        assert!(!MODEL_TOKEN.is_match("4k"));
        assert!(!MODEL_TOKEN.is_match("ultra"));
    }

    #[test]
    fn test_default_policy() {
        let policy = MatchPolicy::default();
        assert_eq!(policy.similarity_threshold, 90);
        assert_eq!(policy.max_candidates, 10);
    }
}
