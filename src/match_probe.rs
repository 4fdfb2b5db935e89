// Match probe - run the matcher against a dictionary from the terminal
use anyhow::Result;
use std::io::BufRead;
use std::path::PathBuf;

use product_extractor::{AppConfig, Dictionary, ProductMatcher};

fn main() -> Result<()> {
    // Logging
    tracing_subscriber::fmt::init();

    println!("=== Product match probe ===\n");

    // 1. Resolve dictionary (argument wins over config)
    let config = AppConfig::load()?;
    let dict_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.dict_path.clone());

    if !dict_path.exists() {
        anyhow::bail!("Dictionary file not found: {}", dict_path.display());
    }

    // 2. Load once
    let dictionary = Dictionary::load_csv(&dict_path)?;
    println!(
        "✓ Dictionary: {} ({} entries)\n",
        dict_path.display(),
        dictionary.len()
    );

    let matcher = ProductMatcher::new(config.matcher);

    // 3. One raw text per line
    println!("Enter raw text, one listing per line (Ctrl+D to quit):");
    for line in std::io::stdin().lock().lines() {
        let raw_text = line?;
        let (query, result) = matcher.extract_with_query(&raw_text, &dictionary);

        println!("─────────────────────────────────");
        println!("raw:        {:?}", query.raw);
        println!("normalized: {:?}", query.normalized);
        println!(
            "tokens:     {:?}",
            query
                .tokens
                .iter()
                .map(|t| format!("{}({:?})", t.text, t.token_type))
                .collect::<Vec<_>>()
        );
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}
