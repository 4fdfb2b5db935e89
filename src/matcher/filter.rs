//! Candidate filter (elimination phase)
//!
//! Narrows the dictionary token by token. A token whose filter would leave no
//! candidates is ignored as noise.

use crate::dictionary::{Dictionary, DictionaryEntry};
use crate::matcher::fuzzy::token_matches;
use crate::matcher::tokenizer::Token;

/// One elimination step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterStep {
    /// Index of the query token
    pub token_index: usize,
    /// Candidate count before the step
    pub before: usize,
    /// Candidate count after the step
    pub after: usize,
    /// Whether the filtered subset replaced the candidate set
    pub committed: bool,
}

/// Elimination outcome
#[derive(Debug, Clone)]
pub struct Narrowing<'d> {
    /// Surviving entries, in dictionary order
    pub candidates: Vec<&'d DictionaryEntry>,
    pub steps: Vec<FilterStep>,
}

impl Narrowing<'_> {
    /// True when tokens were processed but none of them matched any candidate
    pub fn no_overlap(&self) -> bool {
        !self.steps.is_empty() && self.steps.iter().all(|s| !s.committed)
    }
}

/// Candidate filter
#[derive(Debug, Clone, Copy)]
pub struct CandidateFilter {
    similarity_threshold: u8,
}

impl CandidateFilter {
    pub fn new(similarity_threshold: u8) -> Self {
        Self {
            similarity_threshold,
        }
    }

    /// Narrow `dictionary` with the query tokens, left to right
    ///
    /// Stops as soon as a committed filter leaves a single candidate. If
    /// tokens were processed and not one of them matched anything, the query
    /// has no lexical overlap with the dictionary and the candidate set comes
    /// back empty.
    pub fn narrow<'d>(&self, dictionary: &'d Dictionary, tokens: &[Token]) -> Narrowing<'d> {
        let mut candidates: Vec<&'d DictionaryEntry> = dictionary.iter().collect();
        let mut steps = Vec::with_capacity(tokens.len());

        for (token_index, token) in tokens.iter().enumerate() {
            let before = candidates.len();
            let filtered: Vec<&'d DictionaryEntry> = candidates
                .iter()
                .copied()
                .filter(|entry| {
                    token_matches(token, entry.normalized_product(), self.similarity_threshold)
                })
                .collect();

            let committed = !filtered.is_empty();
            if committed {
                candidates = filtered;
            }

            steps.push(FilterStep {
                token_index,
                before,
                after: candidates.len(),
                committed,
            });

            // only a committed filter narrows the set down to one
            if committed && candidates.len() == 1 {
                break;
            }
        }

        let mut narrowing = Narrowing { candidates, steps };
        if narrowing.no_overlap() {
            narrowing.candidates.clear();
        }
        narrowing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::rules::DEFAULT_SIMILARITY_THRESHOLD;
    use crate::matcher::types::Query;
    use proptest::prelude::*;

    fn sample_dictionary() -> Dictionary {
        Dictionary::from_entries(vec![
            DictionaryEntry::new("iPhone 13 Pro 128GB", "Apple", "Smartphones"),
            DictionaryEntry::new("Galaxy S21 Ultra", "Samsung", "Smartphones"),
            DictionaryEntry::new("MacBook Air M1", "Apple", "Laptops"),
            DictionaryEntry::new("MacBook Pro M1", "Apple", "Laptops"),
        ])
    }

    fn narrow<'d>(dictionary: &'d Dictionary, text: &str) -> Narrowing<'d> {
        let query = Query::new(text);
        CandidateFilter::new(DEFAULT_SIMILARITY_THRESHOLD).narrow(dictionary, &query.tokens)
    }

    fn products(narrowing: &Narrowing<'_>) -> Vec<String> {
        narrowing
            .candidates
            .iter()
            .map(|e| e.product().to_string())
            .collect()
    }

    #[test]
    fn test_narrow_sequential() {
        let dictionary = sample_dictionary();
        let narrowing = narrow(&dictionary, "macbook pro");
        assert_eq!(products(&narrowing), vec!["MacBook Pro M1"]);
        assert_eq!(narrowing.steps.len(), 2);
        assert_eq!(narrowing.steps[0].before, 4);
        assert_eq!(narrowing.steps[0].after, 2);
        assert_eq!(narrowing.steps[1].after, 1);
    }

    #[test]
    fn test_narrow_stops_at_single_candidate() {
        let dictionary = sample_dictionary();
        let narrowing = narrow(&dictionary, "galaxy something else entirely");
        assert_eq!(products(&narrowing), vec!["Galaxy S21 Ultra"]);
        assert_eq!(narrowing.steps.len(), 1);
    }

    #[test]
    fn test_narrow_ignores_eliminating_token() {
        let dictionary = sample_dictionary();
        // s22 matches nothing and is skipped; galaxy still narrows
        let narrowing = narrow(&dictionary, "s22 galaxy");
        assert!(!narrowing.steps[0].committed);
        assert_eq!(narrowing.steps[0].after, 4);
        assert!(narrowing.steps[1].committed);
        assert_eq!(products(&narrowing), vec!["Galaxy S21 Ultra"]);
    }

    #[test]
    fn test_narrow_keeps_dictionary_order() {
        let dictionary = sample_dictionary();
        let narrowing = narrow(&dictionary, "m1 apple");
        assert_eq!(products(&narrowing), vec!["MacBook Air M1", "MacBook Pro M1"]);
    }

    #[test]
    fn test_narrow_no_tokens_keeps_everything() {
        let dictionary = sample_dictionary();
        let narrowing = narrow(&dictionary, "");
        assert!(narrowing.steps.is_empty());
        assert!(!narrowing.no_overlap());
        assert_eq!(narrowing.candidates.len(), 4);
    }

    #[test]
    fn test_narrow_no_overlap_empties_candidates() {
        let dictionary = sample_dictionary();
        let narrowing = narrow(&dictionary, "completely unrelated wireless earbuds");
        assert!(narrowing.no_overlap());
        assert!(narrowing.steps.iter().all(|s| s.after == s.before));
        assert!(narrowing.candidates.is_empty());
    }

    #[test]
    fn test_narrow_single_entry_skips_leading_noise() {
        let dictionary = Dictionary::from_entries(vec![DictionaryEntry::new(
            "Galaxy S21 Ultra",
            "Samsung",
            "Smartphones",
        )]);

        let narrowing = narrow(&dictionary, "Samsung Galaxy S21 Ultra");
        assert!(!narrowing.steps[0].committed);
        assert!(narrowing.steps[1].committed);
        assert_eq!(narrowing.steps.len(), 2);
        assert_eq!(products(&narrowing), vec!["Galaxy S21 Ultra"]);

        let narrowing = narrow(&dictionary, "unrelated wireless earbuds");
        assert_eq!(narrowing.steps.len(), 3);
        assert!(narrowing.candidates.is_empty());
    }

    #[test]
    fn test_narrow_empty_dictionary() {
        let dictionary = Dictionary::default();
        let narrowing = narrow(&dictionary, "galaxy");
        assert!(narrowing.candidates.is_empty());
    }

    proptest! {
        #[test]
        fn prop_steps_never_grow_or_commit_empty(
            words in proptest::collection::vec(
                prop::sample::select(vec![
                    "iphone", "galaxy", "s21", "s22", "macbook", "air", "pro",
                    "m1", "m2", "ultra", "ultr", "apple", "13", "earbuds",
                ]),
                0..8,
            )
        ) {
            let dictionary = sample_dictionary();
            let narrowing = narrow(&dictionary, &words.join(" "));
            for step in &narrowing.steps {
                prop_assert!(step.after <= step.before);
                if step.committed {
                    prop_assert!(step.after > 0);
                } else {
                    prop_assert_eq!(step.after, step.before);
                }
            }
            prop_assert!(narrowing.candidates.len() <= dictionary.len());
        }
    }
}
