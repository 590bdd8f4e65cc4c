//! "Did you mean" suggestions
//!
//! Proposes distinct normalized candidate names close to the query by whole-name
//! edit distance, nearest first.

use super::distance::levenshtein;
use super::normalize::char_len;
use crate::catalog::Candidate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    pub max_suggestions: usize,
    /// Suggestions farther than this from the query are never offered
    pub max_distance: usize,
    pub min_query_len: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 3,
            max_distance: 3,
            min_query_len: 3,
        }
    }
}

/// Ordered, distinct corrected query strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuggestionSet {
    pub suggestions: Vec<String>,
}

impl SuggestionSet {
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.suggestions.iter().map(String::as_str)
    }
}

/// Suggest up to `max_suggestions` names within `max_distance` of `query`.
///
/// `query` must be normalized. Names are deduplicated before ranking; ties in
/// distance keep the order the names were first encountered.
pub fn suggest(
    candidates: &[Candidate],
    query: &str,
    max_suggestions: usize,
    config: &SuggestionConfig,
) -> SuggestionSet {
    if char_len(query) < config.min_query_len || max_suggestions == 0 {
        return SuggestionSet::default();
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut scored: Vec<(usize, &str)> = Vec::new();

    for candidate in candidates {
        let name = candidate.normalized_name.as_str();
        if !seen.insert(name) {
            continue;
        }
        let distance = levenshtein(name, query);
        if distance <= config.max_distance {
            scored.push((distance, name));
        }
    }

    scored.sort_by_key(|(distance, _)| *distance);

    SuggestionSet {
        suggestions: scored
            .into_iter()
            .take(max_suggestions)
            .map(|(_, name)| name.to_string())
            .collect(),
    }
}
