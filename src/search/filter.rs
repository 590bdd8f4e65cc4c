//! Conjunctive token filter
//!
//! Narrows a coarse candidate set to names containing *every* query token as
//! a substring, in any order. One Aho-Corasick automaton is built per query
//! and each name is scanned once.

use crate::catalog::Candidate;
use aho_corasick::AhoCorasick;
use tracing::warn;

/// Keep candidates whose normalized name contains all `tokens`.
///
/// A single token needs no further filtering: the coarse fetch already
/// constrained on it. Output order follows input order.
pub fn filter_all_tokens(candidates: Vec<Candidate>, tokens: &[String]) -> Vec<Candidate> {
    if tokens.len() <= 1 {
        return candidates;
    }

    let mut patterns: Vec<&str> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !patterns.contains(&token.as_str()) {
            patterns.push(token);
        }
    }

    let automaton = match AhoCorasick::new(&patterns) {
        Ok(ac) => ac,
        Err(e) => {
            warn!("Falling back to substring scan, automaton build failed: {}", e);
            return candidates
                .into_iter()
                .filter(|c| patterns.iter().all(|p| c.normalized_name.contains(p)))
                .collect();
        }
    };

    candidates
        .into_iter()
        .filter(|c| contains_all(&automaton, &c.normalized_name, patterns.len()))
        .collect()
}

fn contains_all(automaton: &AhoCorasick, haystack: &str, pattern_count: usize) -> bool {
    let mut seen = vec![false; pattern_count];
    let mut remaining = pattern_count;

    for m in automaton.find_overlapping_iter(haystack) {
        let slot = &mut seen[m.pattern().as_usize()];
        if !*slot {
            *slot = true;
            remaining -= 1;
            if remaining == 0 {
                return true;
            }
        }
    }

    false
}
