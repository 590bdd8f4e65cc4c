//! Catalog boundary
//!
//! The search core only ever talks to the catalog through `CandidateFetcher`:
//! one coarse request in, one candidate record set out. The fetcher is passed
//! in at call time; there is no global catalog client.
//!
//! Coarse prefilter contract: the exact-match path sends only the query's
//! *first* normalized token as `name_filter`. Items that contain later tokens
//! but not the first one are never fetched, so they can never be found by an
//! exact search. Implementations must not broaden this on their own.

pub mod memory;
pub mod remote;
pub mod retry;

use crate::error::FetchError;
use crate::search::normalize::normalize;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use memory::InMemoryCatalog;
pub use remote::RemoteCatalog;
pub use retry::{RetryPolicy, RetryingFetcher};

/// A raw catalog record as stored by the external catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

/// A record considered for matching, with its normalized name computed once per fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub record: CatalogRecord,
    pub normalized_name: String,
}

impl Candidate {
    pub fn new(record: CatalogRecord) -> Self {
        let normalized_name = normalize(&record.name);
        Self {
            record,
            normalized_name,
        }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }
}

/// Field the catalog orders by when no relevance ranking applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderField {
    #[default]
    Name,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

/// Ordering requested from the catalog, passed through unmodified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogOrder {
    pub field: OrderField,
    pub direction: OrderDirection,
}

impl CatalogOrder {
    pub const NAME_ASC: Self = Self {
        field: OrderField::Name,
        direction: OrderDirection::Asc,
    };
    pub const PRICE_ASC: Self = Self {
        field: OrderField::Price,
        direction: OrderDirection::Asc,
    };
    pub const PRICE_DESC: Self = Self {
        field: OrderField::Price,
        direction: OrderDirection::Desc,
    };
}

/// Coarse request sent to the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FetchRequest {
    /// Single normalized token the record name must contain; `None` fetches everything
    pub name_filter: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub order: CatalogOrder,
    pub limit: Option<usize>,
}

impl FetchRequest {
    /// Same bounds and order, different name filter and limit
    pub fn with_name_filter(&self, name_filter: Option<String>, limit: Option<usize>) -> Self {
        Self {
            name_filter,
            limit,
            ..self.clone()
        }
    }
}

/// The sole I/O boundary of the search core
#[async_trait]
pub trait CandidateFetcher: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<CatalogRecord>, FetchError>;
}

#[async_trait]
impl<F: CandidateFetcher + ?Sized> CandidateFetcher for std::sync::Arc<F> {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<CatalogRecord>, FetchError> {
        (**self).fetch(request).await
    }
}

/// Fetch and wrap records as candidates
pub async fn fetch_candidates<F: CandidateFetcher + ?Sized>(
    fetcher: &F,
    request: &FetchRequest,
) -> Result<Vec<Candidate>, FetchError> {
    let records = fetcher.fetch(request).await?;
    Ok(records.into_iter().map(Candidate::new).collect())
}
