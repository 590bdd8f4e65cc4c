//! Remote catalog over a PostgREST-style HTTP endpoint
//!
//! `GET {base}/{table}?select=id,name,category,price&name=ilike.*t_k_n*&order=name.asc`
//!
//! `ilike` folds case but not accents. Letters that have accented forms are
//! sent as the single-character wildcard `_`, and every returned name is
//! re-checked against the normalized token before it reaches the pipeline.

use super::{CandidateFetcher, CatalogRecord, FetchRequest, OrderDirection, OrderField};
use crate::error::FetchError;
use crate::search::normalize::normalize;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub struct RemoteCatalog {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl RemoteCatalog {
    /// `endpoint` is the full table URL, e.g. `https://db.example.com/rest/v1/products`
    pub fn new(endpoint: &str, api_key: Option<String>, timeout: Duration) -> Result<Self, FetchError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| FetchError::InvalidResponse(format!("Invalid catalog URL {}: {}", endpoint, e)))?;

        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(concat!("product-search/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// Translate a coarse request into query parameters
    pub fn build_url(&self, request: &FetchRequest) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", "id,name,category,price");

            if let Some(token) = &request.name_filter {
                pairs.append_pair("name", &ilike_pattern(token));
            }
            if let Some(category) = &request.category {
                pairs.append_pair("category", &format!("eq.{}", category));
            }
            if let Some(min) = request.min_price {
                pairs.append_pair("price", &format!("gte.{}", min));
            }
            if let Some(max) = request.max_price {
                pairs.append_pair("price", &format!("lte.{}", max));
            }

            let field = match request.order.field {
                OrderField::Name => "name",
                OrderField::Price => "price",
            };
            let direction = match request.order.direction {
                OrderDirection::Asc => "asc",
                OrderDirection::Desc => "desc",
            };
            pairs.append_pair("order", &format!("{}.{}", field, direction));

            if let Some(limit) = request.limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        url
    }
}

/// Accent-blind `ilike` pattern for a normalized token
fn ilike_pattern(token: &str) -> String {
    let body: String = token
        .chars()
        .map(|c| match c {
            'a' | 'e' | 'i' | 'o' | 'u' | 'y' | 'n' | 'c' => '_',
            // Pattern metacharacters; the post-filter restores exactness
            '*' | '%' | '\\' => '_',
            c => c,
        })
        .collect();
    format!("ilike.*{}*", body)
}

#[async_trait]
impl CandidateFetcher for RemoteCatalog {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<CatalogRecord>, FetchError> {
        let url = self.build_url(request);
        debug!("Fetching catalog candidates from {}", url);

        let mut builder = self.client.get(url);
        if let Some(key) = &self.api_key {
            builder = builder
                .header("apikey", key)
                .bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(e.to_string())
            } else {
                FetchError::Http(e)
            }
        })?;

        let status = response.status();
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::Unavailable(format!("Catalog returned {}", status)));
        }
        if !status.is_success() {
            return Err(FetchError::InvalidResponse(format!("Catalog returned {}", status)));
        }

        let body = response.text().await?;
        let mut records: Vec<CatalogRecord> = serde_json::from_str(&body)?;
        debug!("Catalog returned {} records", records.len());

        if let Some(token) = &request.name_filter {
            let token = normalize(token);
            records.retain(|r| normalize(&r.name).contains(token.as_str()));
            debug!("{} records contain '{}'", records.len(), token);
        }

        Ok(records)
    }
}
