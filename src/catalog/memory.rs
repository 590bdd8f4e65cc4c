//! In-memory catalog
//!
//! Local demo store: records loaded from a JSON array and filtered in process.

use super::{CandidateFetcher, CatalogOrder, CatalogRecord, FetchRequest, OrderDirection, OrderField};
use crate::error::FetchError;
use crate::search::normalize::normalize;
use async_trait::async_trait;
use std::cmp::Ordering;
use std::path::Path;
use tracing::debug;

pub struct InMemoryCatalog {
    /// Records paired with their normalized name and category
    records: Vec<(CatalogRecord, String, Option<String>)>,
}

impl InMemoryCatalog {
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|r| {
                let name = normalize(&r.name);
                let category = r.category.as_deref().map(normalize);
                (r, name, category)
            })
            .collect();
        Self { records }
    }

    /// Parse a JSON array of records
    pub fn from_json(data: &str) -> Result<Self, FetchError> {
        let records: Vec<CatalogRecord> = serde_json::from_str(data)?;
        Ok(Self::new(records))
    }

    /// Load a JSON array of records from disk
    pub async fn load(path: &Path) -> Result<Self, FetchError> {
        let data = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_json(&data)?;
        debug!("Loaded {} catalog records from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matches(
        request: &FetchRequest,
        record: &CatalogRecord,
        name: &str,
        category: Option<&str>,
    ) -> bool {
        if let Some(filter) = &request.name_filter {
            if !name.contains(normalize(filter).as_str()) {
                return false;
            }
        }

        if let Some(wanted) = &request.category {
            if category != Some(normalize(wanted).as_str()) {
                return false;
            }
        }

        if request.min_price.is_some() || request.max_price.is_some() {
            let Some(price) = record.price else {
                return false;
            };
            if request.min_price.is_some_and(|min| price < min) {
                return false;
            }
            if request.max_price.is_some_and(|max| price > max) {
                return false;
            }
        }

        true
    }
}

fn compare(order: CatalogOrder, a: &(&CatalogRecord, &str), b: &(&CatalogRecord, &str)) -> Ordering {
    let ordering = match order.field {
        OrderField::Name => a.1.cmp(b.1).then_with(|| a.0.name.cmp(&b.0.name)),
        // Unpriced records sort after priced ones in either direction
        OrderField::Price => match (a.0.price, b.0.price) {
            (Some(x), Some(y)) => {
                let by_price = x.total_cmp(&y);
                match order.direction {
                    OrderDirection::Asc => by_price,
                    OrderDirection::Desc => by_price.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    };

    match (order.field, order.direction) {
        (OrderField::Name, OrderDirection::Desc) => ordering.reverse(),
        _ => ordering,
    }
}

#[async_trait]
impl CandidateFetcher for InMemoryCatalog {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<CatalogRecord>, FetchError> {
        let mut hits: Vec<(&CatalogRecord, &str)> = self
            .records
            .iter()
            .filter(|(record, name, category)| {
                Self::matches(request, record, name, category.as_deref())
            })
            .map(|(record, name, _)| (record, name.as_str()))
            .collect();

        hits.sort_by(|a, b| compare(request.order, a, b));

        let limit = request.limit.unwrap_or(usize::MAX);
        Ok(hits
            .into_iter()
            .take(limit)
            .map(|(record, _)| record.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> InMemoryCatalog {
        InMemoryCatalog::from_json(
            r#"[
                {"id": "1", "name": "Leche entera", "category": "Lácteos", "price": 1.10},
                {"id": "2", "name": "Aceite de oliva", "category": "Despensa", "price": 6.50},
                {"id": "3", "name": "Azúcar", "category": "Despensa", "price": 0.95},
                {"id": "4", "name": "Leche de avena", "category": "Bebidas"},
                {"id": "5", "name": "Aceite de girasol", "category": "Despensa", "price": 2.30}
            ]"#,
        )
        .unwrap()
    }

    fn ids(records: &[CatalogRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_fetch_all_by_name() {
        let catalog = sample();
        let records = catalog.fetch(&FetchRequest::default()).await.unwrap();
        assert_eq!(ids(&records), vec!["5", "2", "3", "4", "1"]);
    }

    #[tokio::test]
    async fn test_name_filter_is_substring_on_normalized_name() {
        let catalog = sample();
        let request = FetchRequest {
            name_filter: Some("azuc".to_string()),
            ..FetchRequest::default()
        };
        let records = catalog.fetch(&request).await.unwrap();
        assert_eq!(ids(&records), vec!["3"]);
    }

    #[tokio::test]
    async fn test_category_filter_ignores_accents() {
        let catalog = sample();
        let request = FetchRequest {
            category: Some("lacteos".to_string()),
            ..FetchRequest::default()
        };
        let records = catalog.fetch(&request).await.unwrap();
        assert_eq!(ids(&records), vec!["1"]);
    }

    #[tokio::test]
    async fn test_price_bounds_exclude_unpriced() {
        let catalog = sample();
        let request = FetchRequest {
            min_price: Some(1.0),
            max_price: Some(3.0),
            ..FetchRequest::default()
        };
        let records = catalog.fetch(&request).await.unwrap();
        assert_eq!(ids(&records), vec!["5", "1"]);
    }

    #[tokio::test]
    async fn test_price_order() {
        let catalog = sample();
        let asc = FetchRequest {
            order: CatalogOrder::PRICE_ASC,
            ..FetchRequest::default()
        };
        let records = catalog.fetch(&asc).await.unwrap();
        assert_eq!(ids(&records), vec!["3", "1", "5", "2", "4"]);

        let desc = FetchRequest {
            order: CatalogOrder::PRICE_DESC,
            ..FetchRequest::default()
        };
        let records = catalog.fetch(&desc).await.unwrap();
        assert_eq!(ids(&records), vec!["2", "5", "1", "3", "4"]);
    }

    #[tokio::test]
    async fn test_limit() {
        let catalog = sample();
        let request = FetchRequest {
            limit: Some(2),
            ..FetchRequest::default()
        };
        assert_eq!(catalog.fetch(&request).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "a", "name": "Pan"}}]"#).unwrap();
        let catalog = InMemoryCatalog::load(file.path()).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.is_empty());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = InMemoryCatalog::load(Path::new("/nonexistent/catalog.json"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, FetchError::Io(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = InMemoryCatalog::from_json("[{").err().unwrap();
        assert!(matches!(err, FetchError::Json(_)));
    }
}
