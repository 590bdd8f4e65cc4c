//! Product search pipeline
//!
//! Normalization, tokenization, conjunctive filtering, typo detection, fuzzy
//! matching, suggestions, ranking and pagination. `engine` wires them together.

pub mod distance;
pub mod engine;
pub mod filter;
pub mod fuzzy;
pub mod normalize;
pub mod paginate;
pub mod ranking;
pub mod suggest;
pub mod tokenizer;
pub mod typo;


pub use engine::{SearchEngine, SearchOutcome, SearchRequest};
pub use fuzzy::{FuzzyConfig, FuzzyMatch, FuzzyMatcher};
pub use paginate::{Page, DEFAULT_PAGE_SIZE};
pub use ranking::{MatchKind, RelevanceScore, ScoredResult};
pub use suggest::{SuggestionConfig, SuggestionSet};
pub use tokenizer::Query;
pub use typo::TypoConfig;
