//! Query tokenization
//!
//! Splits normalized text into whitespace-separated tokens and bundles a raw
//! query with its normalized form and token sequence.

use super::normalize::{char_len, normalize};
use serde::Serialize;

/// Split normalized text into ordered, non-empty tokens
pub fn tokenize(normalized: &str) -> Vec<String> {
    normalized.split_whitespace().map(str::to_string).collect()
}

/// A parsed search query, immutable for the duration of one search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    /// Original unmodified input
    pub raw: String,
    /// Normalized form used for every comparison
    pub normalized: String,
    /// Ordered tokens of the normalized form
    pub tokens: Vec<String>,
}

impl Query {
    pub fn parse(raw: &str) -> Self {
        let normalized = normalize(raw);
        let tokens = tokenize(&normalized);
        Self {
            raw: raw.to_string(),
            normalized,
            tokens,
        }
    }

    /// A query that normalizes to nothing means "no search"
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Token used for the coarse catalog prefilter
    pub fn first_token(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        char_len(&self.normalized)
    }
}
