//! CLI mode implementation
//!
//! Command-line interface for searching a product catalog

use clap::{Args, Parser, Subcommand, ValueEnum};
use product_search::catalog::CatalogOrder;
use product_search::output::OutputFormat;
use product_search::search::SearchRequest;
use std::path::PathBuf;

/// Product search CLI
#[derive(Parser, Debug)]
#[command(name = "product-search")]
#[command(about = "Typo-tolerant product catalog search", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Config file (defaults to $PRODUCT_SEARCH_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the catalog
    Search(SearchArgs),
    /// Print "did you mean" suggestions for a query
    Suggest(SuggestArgs),
}

/// Where candidates come from
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// JSON file holding an array of {id, name, category?, price?} records
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// PostgREST table endpoint, e.g. https://db.example.com/rest/v1/products
    #[arg(long)]
    pub remote_url: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RemoteAuthArgs {
    /// API key sent as `apikey` and bearer token to the remote catalog
    #[arg(long, env = "PRODUCT_SEARCH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Only products in this category
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub min_price: Option<f64>,

    #[arg(long)]
    pub max_price: Option<f64>,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub auth: RemoteAuthArgs,

    /// Search terms (case and accent insensitive); empty lists the catalog
    #[arg(short = 'q', long, default_value = "")]
    pub query: String,

    /// Page number, starting at 1
    #[arg(short = 'p', long, default_value_t = 1)]
    pub page: usize,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Catalog order, used as-is for empty queries
    #[arg(long, value_enum, default_value_t = SortOrder::Name)]
    pub order: SortOrder,

    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub auth: RemoteAuthArgs,

    #[arg(short = 'q', long)]
    pub query: String,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Name,
    PriceAsc,
    PriceDesc,
}

impl From<SortOrder> for CatalogOrder {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Name => CatalogOrder::NAME_ASC,
            SortOrder::PriceAsc => CatalogOrder::PRICE_ASC,
            SortOrder::PriceDesc => CatalogOrder::PRICE_DESC,
        }
    }
}

impl FilterArgs {
    fn apply(&self, request: SearchRequest) -> SearchRequest {
        SearchRequest {
            category: self.category.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            ..request
        }
    }
}

impl SearchArgs {
    pub fn to_request(&self) -> SearchRequest {
        let request = SearchRequest {
            order: self.order.into(),
            ..SearchRequest::new(self.query.clone()).page(self.page)
        };
        self.filters.apply(request)
    }
}

impl SuggestArgs {
    pub fn to_request(&self) -> SearchRequest {
        self.filters.apply(SearchRequest::new(self.query.clone()))
    }
}
