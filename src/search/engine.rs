//! Search Engine Integration
//!
//! Ties the pipeline together:
//!
//! query -> normalize/tokenize -> coarse fetch (first token) -> conjunctive filter
//! -> [too few results] typo detection -> fuzzy match + suggestions
//! -> relevance ranking -> pagination
//!
//! The engine holds no per-query state; every call builds and drops its own
//! candidate, result and suggestion sets.

use super::filter::filter_all_tokens;
use super::fuzzy::FuzzyMatcher;
use super::paginate::{paginate, Page};
use super::ranking::{rank, ScoredResult};
use super::suggest::{suggest, SuggestionSet};
use super::tokenizer::Query;
use super::typo::is_likely_typo;
use crate::catalog::{fetch_candidates, CandidateFetcher, CatalogOrder, FetchRequest};
use crate::config::SearchConfig;
use crate::error::SearchError;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// One search as issued by a caller
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    /// 1-indexed
    pub page: usize,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub order: CatalogOrder,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            category: None,
            min_price: None,
            max_price: None,
            order: CatalogOrder::default(),
        }
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Catalog request carrying this search's bounds and order, with no name filter
    fn base_fetch(&self) -> FetchRequest {
        FetchRequest {
            name_filter: None,
            category: self.category.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            order: self.order,
            limit: None,
        }
    }
}

/// Everything a caller gets back from one search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub query: Query,
    pub page: Page<ScoredResult>,
    pub suggestions: Option<SuggestionSet>,
    /// Whether approximate matching contributed to the result set
    pub fuzzy_fallback: bool,
}

/// Search engine that combines fetching, filtering, matching and ranking
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    config: SearchConfig,
    fuzzy_matcher: FuzzyMatcher,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SearchConfig) -> Self {
        let fuzzy_matcher = FuzzyMatcher::with_config(config.fuzzy.clone());
        Self {
            config,
            fuzzy_matcher,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run one query start to finish against `fetcher`.
    ///
    /// Fetch failures propagate as `SearchError::FetchFailed` with no partial
    /// results; out-of-range pages are rejected with `SearchError::InvalidPage`.
    pub async fn search<F: CandidateFetcher + ?Sized>(
        &self,
        fetcher: &F,
        request: &SearchRequest,
    ) -> Result<SearchOutcome, SearchError> {
        let query = self.parse_query(&request.query)?;
        let base = request.base_fetch();

        if query.is_empty() {
            debug!("Empty query, returning catalog order");
            let candidates = fetch_candidates(fetcher, &base).await?;
            let results: Vec<ScoredResult> =
                candidates.into_iter().map(ScoredResult::unranked).collect();
            let page = paginate(results, request.page, self.config.page_size)?;
            return Ok(SearchOutcome {
                query,
                page,
                suggestions: None,
                fuzzy_fallback: false,
            });
        }

        // Coarse prefilter on the first token only
        let coarse = base.with_name_filter(query.first_token().map(str::to_string), None);
        let candidates = fetch_candidates(fetcher, &coarse).await?;
        debug!(
            "Coarse fetch for '{}' returned {} candidates",
            coarse.name_filter.as_deref().unwrap_or_default(),
            candidates.len()
        );

        let filtered = filter_all_tokens(candidates, &query.tokens);
        debug!(
            "{} candidates contain all {} tokens",
            filtered.len(),
            query.tokens.len()
        );

        let mut results: Vec<ScoredResult> = filtered
            .into_iter()
            .map(|c| ScoredResult::scored(c, &query))
            .collect();

        let mut suggestions = None;
        let mut fuzzy_fallback = false;

        if results.len() < self.config.min_exact_results
            && query.len() >= self.config.fuzzy.min_query_len
        {
            let pool_request = base.with_name_filter(None, Some(self.config.fuzzy_pool_limit));
            let pool = fetch_candidates(fetcher, &pool_request).await?;
            debug!(
                "Only {} exact results, fetched fuzzy pool of {}",
                results.len(),
                pool.len()
            );

            if is_likely_typo(&pool, &query.raw, &self.config.typo) {
                let matches = self.fuzzy_matcher.find(&pool, &query.normalized);
                debug!("Likely typo, fuzzy engine matched {}", matches.len());

                let set = suggest(
                    &pool,
                    &query.normalized,
                    self.config.suggestions.max_suggestions,
                    &self.config.suggestions,
                );
                if !set.is_empty() {
                    suggestions = Some(set);
                }

                let mut seen: HashSet<String> =
                    results.iter().map(|r| r.candidate.id().to_string()).collect();
                for m in matches {
                    if seen.insert(m.candidate.id().to_string()) {
                        results.push(ScoredResult::fuzzy(m.candidate, &query, m.score));
                        fuzzy_fallback = true;
                    }
                }
            } else {
                debug!("No typo signalled for '{}'", query.normalized);
            }
        }

        rank(&mut results, &query);
        let page = paginate(results, request.page, self.config.page_size)?;

        Ok(SearchOutcome {
            query,
            page,
            suggestions,
            fuzzy_fallback,
        })
    }

    /// "Did you mean" suggestions only, computed over the broad candidate pool
    pub async fn suggestions<F: CandidateFetcher + ?Sized>(
        &self,
        fetcher: &F,
        request: &SearchRequest,
    ) -> Result<SuggestionSet, SearchError> {
        let query = self.parse_query(&request.query)?;
        if query.is_empty() {
            return Ok(SuggestionSet::default());
        }

        let pool_request = request
            .base_fetch()
            .with_name_filter(None, Some(self.config.fuzzy_pool_limit));
        let pool = fetch_candidates(fetcher, &pool_request).await?;

        Ok(suggest(
            &pool,
            &query.normalized,
            self.config.suggestions.max_suggestions,
            &self.config.suggestions,
        ))
    }

    /// Length is measured after normalization, so padding never makes a query too long
    fn parse_query(&self, raw: &str) -> Result<Query, SearchError> {
        let query = Query::parse(raw);
        if query.len() > self.config.max_query_len {
            return Err(SearchError::InvalidInput(format!(
                "Query too long, maximum {} characters",
                self.config.max_query_len
            )));
        }
        Ok(query)
    }
}
