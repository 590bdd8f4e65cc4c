//! Exponential-backoff retry around any `CandidateFetcher`
//!
//! The search core never retries; callers opt in by wrapping their fetcher.

use super::{CandidateFetcher, CatalogRecord, FetchRequest};
use crate::error::FetchError;
use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    /// Randomize each delay within `[delay / 2, delay]`
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 200,
            max_backoff_ms: 2000,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (0-based), before jitter
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 1u64.checked_shl(retry).unwrap_or(u64::MAX);
        let ms = self
            .initial_backoff_ms
            .saturating_mul(factor)
            .min(self.max_backoff_ms);
        Duration::from_millis(ms)
    }

    fn delay(&self, retry: u32) -> Duration {
        let base = self.backoff(retry);
        if !self.jitter || base.is_zero() {
            return base;
        }
        let ms = base.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(ms / 2..=ms))
    }
}

pub struct RetryingFetcher<F> {
    inner: F,
    policy: RetryPolicy,
}

impl<F: CandidateFetcher> RetryingFetcher<F> {
    pub fn new(inner: F, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

#[async_trait]
impl<F: CandidateFetcher> CandidateFetcher for RetryingFetcher<F> {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<CatalogRecord>, FetchError> {
        let attempts = self.policy.max_attempts.max(1);
        let mut retry = 0;

        loop {
            match self.inner.fetch(request).await {
                Ok(records) => return Ok(records),
                Err(e) if e.is_transient() && retry + 1 < attempts => {
                    let delay = self.policy.delay(retry);
                    warn!(
                        "Catalog fetch failed (attempt {}/{}): {}; retrying in {:?}",
                        retry + 1,
                        attempts,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
