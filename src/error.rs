//! Error types for the search pipeline and its catalog collaborators

use thiserror::Error;

/// Failure reported by a `CandidateFetcher`
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
    #[error("Catalog request timed out: {0}")]
    Timeout(String),
    #[error("Invalid catalog response: {0}")]
    InvalidResponse(String),

    #[error("Catalog I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Catalog HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl FetchError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Unavailable(_) | FetchError::Timeout(_) => true,
            FetchError::Http(err) => {
                err.is_timeout()
                    || err.is_connect()
                    || err.status().is_some_and(|s| s.is_server_error())
            }
            FetchError::InvalidResponse(_) | FetchError::Io(_) | FetchError::Json(_) => false,
        }
    }
}

/// Errors surfaced by the search pipeline
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Candidate fetch failed: {0}")]
    FetchFailed(#[from] FetchError),
    #[error("Invalid page {requested}: valid pages are 1..={total_pages}")]
    InvalidPage { requested: usize, total_pages: usize },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Search aborted: {0}")]
    Aborted(String),
}

impl SearchError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            SearchError::FetchFailed(_) => "fetch_failed",
            SearchError::InvalidPage { .. } => "invalid_page",
            SearchError::InvalidInput(_) => "invalid_input",
            SearchError::Config(_) => "config_error",
            SearchError::Aborted(_) => "search_aborted",
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_display() {
        let error = SearchError::InvalidPage {
            requested: 5,
            total_pages: 2,
        };
        assert_eq!(error.to_string(), "Invalid page 5: valid pages are 1..=2");
        assert_eq!(error.error_code(), "invalid_page");

        let error = SearchError::InvalidInput("query too long".to_string());
        assert_eq!(error.message(), "Invalid input: query too long");
        assert_eq!(error.error_code(), "invalid_input");
    }

    #[test]
    fn test_fetch_error_conversion() {
        let fetch = FetchError::Unavailable("connection refused".to_string());
        let search: SearchError = fetch.into();
        assert!(matches!(search, SearchError::FetchFailed(FetchError::Unavailable(_))));
        assert_eq!(search.error_code(), "fetch_failed");
        assert_eq!(
            search.to_string(),
            "Candidate fetch failed: Catalog unavailable: connection refused"
        );
    }

    #[test]
    fn test_fetch_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let fetch: FetchError = json_error.into();
        assert!(matches!(fetch, FetchError::Json(_)));
        assert!(!fetch.is_transient());
    }

    #[test]
    fn test_transient_classification() {
        assert!(FetchError::Unavailable("down".to_string()).is_transient());
        assert!(FetchError::Timeout("slow".to_string()).is_transient());
        assert!(!FetchError::InvalidResponse("bad".to_string()).is_transient());
    }
}
