pub mod config;
pub mod dictionary;
pub mod matcher;
pub mod server;

pub use config::AppConfig;
pub use dictionary::{Dictionary, DictionaryEntry};
pub use matcher::{MatchPolicy, MatchResult, MatchedProduct, ProductMatcher};

/// Start the extraction service
///
/// Loads config and the dictionary once, then serves requests against that
/// read-only dictionary until the process stops.
pub async fn run() -> anyhow::Result<()> {
    // Logging
    tracing_subscriber::fmt::init();

    let config = AppConfig::load()?;
    let dictionary = Dictionary::load_csv(&config.dict_path)?;
    let matcher = ProductMatcher::new(config.matcher);

    tracing::info!(
        "Matcher policy: similarity >= {}, candidate cutoff {}",
        config.matcher.similarity_threshold,
        config.matcher.max_candidates
    );

    server::serve(&config, server::AppState::new(dictionary, matcher)).await
}
