//! Product matcher
//!
//! Maps noisy listing text to a catalog entry.
//!
//! ## Pipeline
//! 1. Normalize (entities, lowercase, unit numbers, symbols, whitespace)
//! 2. Tokenize and classify (model / descriptive)
//! 3. Eliminate candidates token by token
//! 4. Decide: no match, best fuzzy score, or too many candidates

mod engine;
mod filter;
mod fuzzy;
mod normalizer;
mod rules;
mod tokenizer;
mod types;

pub use engine::ProductMatcher;
pub use filter::{CandidateFilter, FilterStep, Narrowing};
pub use fuzzy::{edit_distance, similarity_ratio, token_matches};
pub use normalizer::normalize;
pub use rules::{
    MatchPolicy, TextRule, DEFAULT_MAX_FUZZY_CANDIDATES, DEFAULT_SIMILARITY_THRESHOLD, TECH_UNITS,
};
pub use tokenizer::{is_model_token, Token, TokenType, Tokenizer};
pub use types::{MatchResult, MatchedProduct, Query};
