//! Ranking & Scoring System
//!
//! Four relevance tiers, highest first:
//!
//! | tier | rule |
//! |------|------|
//! | 3 | normalized name equals the normalized query |
//! | 2 | name starts with the full normalized query |
//! | 1 | some name token starts with some query token |
//! | 0 | none of the above |
//!
//! Within a tier, names sort ascending.

use super::tokenizer::{tokenize, Query};
use crate::catalog::Candidate;
use serde::Serialize;

/// How a result matched the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchKind {
    Exact,
    StartsWith,
    TokenStartsWith,
    /// Only found through approximate matching
    Fuzzy,
    None,
}

impl MatchKind {
    pub fn label(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::StartsWith => "starts-with",
            MatchKind::TokenStartsWith => "token-starts-with",
            MatchKind::Fuzzy => "fuzzy",
            MatchKind::None => "none",
        }
    }
}

/// Relevance tier plus a secondary numeric signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RelevanceScore {
    pub tier: u8,
    /// Fuzzy closeness in `0.0..=1.0` (1.0 = perfect) for fuzzy hits, 0.0 otherwise
    pub secondary: f64,
}

/// A candidate paired with its relevance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult {
    pub candidate: Candidate,
    pub score: RelevanceScore,
    pub kind: MatchKind,
}

impl ScoredResult {
    /// Result shown in catalog order when there is no query
    pub fn unranked(candidate: Candidate) -> Self {
        Self {
            candidate,
            score: RelevanceScore {
                tier: 0,
                secondary: 0.0,
            },
            kind: MatchKind::None,
        }
    }

    /// Score an exact-path candidate against the query
    pub fn scored(candidate: Candidate, query: &Query) -> Self {
        let (tier, kind) = classify(&candidate.normalized_name, query);
        Self {
            candidate,
            score: RelevanceScore {
                tier,
                secondary: 0.0,
            },
            kind,
        }
    }

    /// Score a candidate found by the fuzzy engine; `fuzzy_score` is lower-is-better
    pub fn fuzzy(candidate: Candidate, query: &Query, fuzzy_score: f64) -> Self {
        let (tier, kind) = classify(&candidate.normalized_name, query);
        let kind = if kind == MatchKind::None {
            MatchKind::Fuzzy
        } else {
            kind
        };
        Self {
            candidate,
            score: RelevanceScore {
                tier,
                secondary: (1.0 - fuzzy_score).clamp(0.0, 1.0),
            },
            kind,
        }
    }
}

/// Determine tier and match kind for a normalized name
pub fn classify(normalized_name: &str, query: &Query) -> (u8, MatchKind) {
    if query.is_empty() {
        return (0, MatchKind::None);
    }

    if normalized_name == query.normalized {
        return (3, MatchKind::Exact);
    }

    if normalized_name.starts_with(query.normalized.as_str()) {
        return (2, MatchKind::StartsWith);
    }

    let name_tokens = tokenize(normalized_name);
    let token_prefix = name_tokens
        .iter()
        .any(|nt| query.tokens.iter().any(|qt| nt.starts_with(qt.as_str())));
    if token_prefix {
        return (1, MatchKind::TokenStartsWith);
    }

    (0, MatchKind::None)
}

/// Order results by tier (descending), then normalized name (ascending).
///
/// With an empty query the catalog order is kept untouched.
///
/// The name tiebreak is code-point order of the normalized name, not a locale
/// collation: diacritics are already stripped, so "ñ" sorts as "n".
pub fn rank(results: &mut [ScoredResult], query: &Query) {
    if query.is_empty() {
        return;
    }

    results.sort_by(|a, b| {
        b.score
            .tier
            .cmp(&a.score.tier)
            .then_with(|| a.candidate.normalized_name.cmp(&b.candidate.normalized_name))
    });
}
