//! Search configuration
//!
//! Loaded from JSON. Lookup order: explicit path, `$PRODUCT_SEARCH_CONFIG`,
//! then `<config dir>/product-search/config.json`. A missing file means defaults.

use crate::catalog::RetryPolicy;
use crate::search::fuzzy::FuzzyConfig;
use crate::search::paginate::DEFAULT_PAGE_SIZE;
use crate::search::suggest::SuggestionConfig;
use crate::search::typo::TypoConfig;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_ENV_VAR: &str = "PRODUCT_SEARCH_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub page_size: usize,
    /// Queries whose normalized form is longer than this (chars) are rejected
    pub max_query_len: usize,
    /// Fuzzy fallback runs when exact matching yields fewer results than this
    pub min_exact_results: usize,
    /// Cap on the broad pool fetched for the fuzzy fallback
    pub fuzzy_pool_limit: usize,
    pub fuzzy: FuzzyConfig,
    pub typo: TypoConfig,
    pub suggestions: SuggestionConfig,
    pub retry: RetryPolicy,
    /// Applied around catalog calls by the binary
    pub fetch_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_query_len: 200,
            min_exact_results: 1,
            fuzzy_pool_limit: 2000,
            fuzzy: FuzzyConfig::default(),
            typo: TypoConfig::default(),
            suggestions: SuggestionConfig::default(),
            retry: RetryPolicy::default(),
            fetch_timeout_secs: 30,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.fuzzy.threshold) {
            bail!("fuzzy.threshold must be between 0.0 and 1.0");
        }
        if self.retry.max_attempts == 0 {
            bail!("retry.max_attempts must be at least 1");
        }
        Ok(())
    }
}

/// Default location of the configuration file
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Cannot determine config directory")?;
    Ok(config_dir.join("product-search").join("config.json"))
}

/// Resolve which file to read
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    default_config_path()
}

/// Load the configuration, falling back to defaults when the file is absent
pub fn load_config(explicit: Option<&Path>) -> Result<SearchConfig> {
    let path = resolve_config_path(explicit)?;
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<SearchConfig> {
    if !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return Ok(SearchConfig::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: SearchConfig = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    config.validate()?;
    debug!("Loaded config from {}", path.display());

    Ok(config)
}
