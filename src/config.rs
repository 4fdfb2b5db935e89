// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::matcher::MatchPolicy;

// ============================================================================
// Environment variables
// ============================================================================

/// Explicit config file path
pub const ENV_CONFIG_PATH: &str = "EXTRACTOR_CONFIG";
/// Dictionary CSV path
pub const ENV_DICT_PATH: &str = "DICT_PATH";
/// Listen port
pub const ENV_PORT: &str = "PORT";
/// Listen address
pub const ENV_HOST: &str = "HOST";

// ============================================================================
// Application config
// ============================================================================

/// Application config
///
/// Read from JSON, then overridden by the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Dictionary CSV file (header row: product, brand, category)
    #[serde(default = "default_dict_path")]
    pub dict_path: PathBuf,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Matching thresholds
    #[serde(default)]
    pub matcher: MatchPolicy,
}

fn default_dict_path() -> PathBuf {
    PathBuf::from("dictionary.csv")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dict_path: default_dict_path(),
            host: default_host(),
            port: default_port(),
            matcher: MatchPolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
            return Ok(PathBuf::from(path));
        }
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Cannot resolve config directory"))?;
        Ok(config_dir.join("ProductExtractor").join("config.json"))
    }

    /// Load config file, apply environment overrides, validate
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_from_path(&path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file; a missing file yields the defaults
    pub fn load_from_path(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from: {:?}", path);

        if !path.exists() {
            tracing::warn!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {:?}", path))?;
        Ok(config)
    }

    /// Override fields from environment-style lookups
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DICT_PATH).filter(|v| !v.is_empty()) {
            self.dict_path = PathBuf::from(path);
        }

        if let Some(host) = lookup(ENV_HOST).filter(|v| !v.is_empty()) {
            self.host = host;
        }

        if let Some(port) = lookup(ENV_PORT).filter(|v| !v.is_empty()) {
            match port.trim().parse::<u16>() {
                Ok(port) => self.port = port,
                Err(e) => tracing::warn!("Ignoring invalid {}={:?}: {}", ENV_PORT, port, e),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.matcher.similarity_threshold > 100 {
            anyhow::bail!(
                "matcher.similarity_threshold must be within 0..=100, got {}",
                self.matcher.similarity_threshold
            );
        }
        if self.matcher.max_candidates == 0 {
            anyhow::bail!("matcher.max_candidates must be at least 1");
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
