//! Fuzzy Matching Engine
//!
//! Bounded-tolerance approximate matching over normalized names. Each candidate
//! is scored by its best alignment with the query:
//!
//! ```text
//! score = errors / query_len + |window_start - location| / distance
//! ```
//!
//! Lower is better; candidates scoring above `threshold` are excluded rather
//! than down-ranked. Ties keep the original candidate order.

use super::distance::{align, Alignment};
use super::normalize::char_len;
use crate::catalog::Candidate;
use serde::{Deserialize, Serialize};

/// Tolerance settings for approximate matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyConfig {
    /// Upper bound on returned matches
    pub max_results: usize,
    /// Queries shorter than this skip fuzzy matching entirely
    pub min_query_len: usize,
    /// Maximum accepted score (0.0 = perfect only, 1.0 = anything)
    pub threshold: f64,
    /// How far from `location` a match may start before the proximity penalty reaches 1.0
    pub distance: usize,
    /// Expected character offset of the match inside the name
    pub location: usize,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            max_results: 20,
            min_query_len: 2,
            threshold: 0.4,
            distance: 100,
            location: 0,
        }
    }
}

/// A candidate accepted by the fuzzy engine
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    pub candidate: Candidate,
    /// Combined score, lower is better
    pub score: f64,
    /// Best alignment; `None` when the query was too short to align
    pub alignment: Option<Alignment>,
}

/// Fuzzy matcher with configuration
#[derive(Debug, Clone, Default)]
pub struct FuzzyMatcher {
    config: FuzzyConfig,
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FuzzyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FuzzyConfig {
        &self.config
    }

    /// Return up to `config.max_results` candidates that approximately match `query`.
    ///
    /// `query` must already be normalized. Below `min_query_len` the candidate
    /// set falls through unfiltered (still capped at `max_results`).
    pub fn find(&self, candidates: &[Candidate], query: &str) -> Vec<FuzzyMatch> {
        let query_len = char_len(query);
        let max_results = self.config.max_results;

        if query_len < self.config.min_query_len {
            return candidates
                .iter()
                .take(max_results)
                .map(|c| FuzzyMatch {
                    candidate: c.clone(),
                    score: 0.0,
                    alignment: None,
                })
                .collect();
        }

        let mut scored: Vec<(usize, f64, Alignment)> = candidates
            .iter()
            .enumerate()
            .filter_map(|(index, c)| {
                let alignment = align(query, &c.normalized_name);
                let score = self.score(&alignment, query_len);
                (score <= self.config.threshold).then_some((index, score, alignment))
            })
            .collect();

        // Stable sort keeps encounter order among equal scores
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.truncate(max_results);

        scored
            .into_iter()
            .map(|(index, score, alignment)| FuzzyMatch {
                candidate: candidates[index].clone(),
                score,
                alignment: Some(alignment),
            })
            .collect()
    }

    /// Combine alignment accuracy with how far the window sits from `location`
    fn score(&self, alignment: &Alignment, query_len: usize) -> f64 {
        let accuracy = alignment.errors as f64 / query_len as f64;
        let proximity = alignment.start.abs_diff(self.config.location);

        let proximity_penalty = if self.config.distance == 0 {
            if proximity == 0 {
                0.0
            } else {
                1.0
            }
        } else {
            proximity as f64 / self.config.distance as f64
        };

        accuracy + proximity_penalty
    }
}
