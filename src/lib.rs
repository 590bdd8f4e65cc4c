//! Typo-tolerant product catalog search
//!
//! A request flows through normalization, a coarse catalog fetch, a
//! conjunctive token filter, an optional typo-driven fuzzy fallback with
//! suggestions, relevance ranking and pagination. Catalog access is behind the
//! [`catalog::CandidateFetcher`] trait.

pub mod catalog;
pub mod config;
pub mod error;
pub mod output;
pub mod search;
pub mod sequencer;

pub use catalog::{CandidateFetcher, CatalogRecord, FetchRequest};
pub use error::{FetchError, SearchError};
pub use search::{SearchEngine, SearchOutcome, SearchRequest};
pub use sequencer::{QuerySequencer, QueryTicket, SearchSession};
