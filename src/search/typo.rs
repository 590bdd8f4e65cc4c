//! Typo detection
//!
//! Decides whether approximate matching is worth attempting. The comparison is
//! between the *whole* normalized candidate name and the *whole* normalized
//! query, so short queries rarely trigger against long multi-word names.

use super::distance::levenshtein;
use super::normalize::{char_len, normalize};
use crate::catalog::Candidate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypoConfig {
    /// Queries shorter than this (normalized chars) never signal a typo
    pub min_query_len: usize,
    /// A candidate within this edit distance of the query signals a typo
    pub max_distance: usize,
}

impl Default for TypoConfig {
    fn default() -> Self {
        Self {
            min_query_len: 3,
            max_distance: 2,
        }
    }
}

/// Returns true when the query looks like a misspelling of some candidate name
pub fn is_likely_typo(candidates: &[Candidate], raw_query: &str, config: &TypoConfig) -> bool {
    let query = normalize(raw_query);
    if char_len(&query) < config.min_query_len {
        return false;
    }

    if candidates
        .iter()
        .any(|c| c.normalized_name.contains(query.as_str()))
    {
        return false;
    }

    candidates
        .iter()
        .any(|c| levenshtein(&c.normalized_name, &query) <= config.max_distance)
}
