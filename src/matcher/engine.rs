//! Matching engine
//!
//! Combines normalization, tokenization, elimination and the decision policy.

use crate::dictionary::{Dictionary, DictionaryEntry};
use crate::matcher::filter::CandidateFilter;
use crate::matcher::fuzzy::similarity_ratio;
use crate::matcher::rules::MatchPolicy;
use crate::matcher::types::{MatchResult, MatchedProduct, Query};

/// Product matcher (stateless apart from its policy)
///
/// Holds no dictionary: callers pass the shared read-only [`Dictionary`] into
/// every call, so one matcher can serve any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct ProductMatcher {
    policy: MatchPolicy,
    filter: CandidateFilter,
}

impl ProductMatcher {
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            policy,
            filter: CandidateFilter::new(policy.similarity_threshold),
        }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Map raw text to a catalog entry
    ///
    /// Total: always returns one of the three results.
    pub fn extract(&self, raw_text: &str, dictionary: &Dictionary) -> MatchResult {
        self.extract_with_query(raw_text, dictionary).1
    }

    /// Same as [`extract`](Self::extract), also returning the parsed query
    pub fn extract_with_query(
        &self,
        raw_text: &str,
        dictionary: &Dictionary,
    ) -> (Query, MatchResult) {
        let query = Query::new(raw_text);
        let narrowing = self.filter.narrow(dictionary, &query.tokens);

        tracing::debug!(
            normalized = %query.normalized,
            tokens = query.tokens.len(),
            steps = narrowing.steps.len(),
            candidates = narrowing.candidates.len(),
            "elimination finished"
        );

        let result = self.decide(&query, &narrowing.candidates);
        (query, result)
    }

    /// Turn a candidate set into a result
    ///
    /// - no candidates: `NoMatch`
    /// - fewer than `max_candidates`: best similarity against the full
    ///   normalized query, earliest candidate on ties
    /// - otherwise: `TooManyCandidates`, without scoring
    pub fn decide(&self, query: &Query, candidates: &[&DictionaryEntry]) -> MatchResult {
        match candidates.len() {
            0 => MatchResult::NoMatch,
            n if n < self.policy.max_candidates => {
                match Self::best_candidate(&query.normalized, candidates) {
                    Some(best) => MatchResult::MatchedFuzzyMax(MatchedProduct::from(best)),
                    None => MatchResult::NoMatch,
                }
            }
            _ => MatchResult::TooManyCandidates,
        }
    }

    /// Highest scoring candidate; the first one wins among equal scores
    fn best_candidate<'d>(
        normalized_query: &str,
        candidates: &[&'d DictionaryEntry],
    ) -> Option<&'d DictionaryEntry> {
        let mut best: Option<(&'d DictionaryEntry, u8)> = None;

        for &candidate in candidates {
            let score = similarity_ratio(candidate.normalized_product(), normalized_query);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((candidate, score)),
            }
        }

        best.map(|(entry, _)| entry)
    }
}

impl Default for ProductMatcher {
    fn default() -> Self {
        Self::new(MatchPolicy::default())
    }
}
