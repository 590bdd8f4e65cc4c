//! product-search CLI
//!
//! - `search`: ranked, paginated, typo-tolerant search over a catalog
//! - `suggest`: "did you mean" suggestions for a query
//!
//! Catalogs come from a local JSON file or a PostgREST-style HTTP endpoint.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, RemoteAuthArgs, SourceArgs};
use product_search::catalog::{CandidateFetcher, InMemoryCatalog, RemoteCatalog, RetryingFetcher};
use product_search::config::{load_config, SearchConfig};
use product_search::error::{FetchError, SearchError};
use product_search::output::{self, OutputFormat};
use product_search::search::SearchEngine;
use std::future::Future;
use tokio::time::{timeout, Duration};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags; RUST_LOG wins when set
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    match run(cli).await {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> Result<String> {
    let config = load_config(cli.config.as_deref())?;
    let engine = SearchEngine::with_config(config.clone());

    match cli.command {
        Commands::Search(args) => {
            let fetcher = open_catalog(&args.source, &args.auth, &config).await?;
            let request = args.to_request();
            info!("Searching for '{}' (page {})", request.query, request.page);

            let outcome = with_timeout(&config, engine.search(&*fetcher, &request)).await?;
            debug!(
                "{} results, fuzzy fallback: {}",
                outcome.page.total, outcome.fuzzy_fallback
            );

            Ok(match args.format {
                OutputFormat::Markdown => output::render_markdown(&outcome),
                OutputFormat::Json => output::render_json(&outcome)? + "\n",
            })
        }
        Commands::Suggest(args) => {
            let fetcher = open_catalog(&args.source, &args.auth, &config).await?;
            let request = args.to_request();

            let suggestions =
                with_timeout(&config, engine.suggestions(&*fetcher, &request)).await?;

            Ok(match args.format {
                OutputFormat::Markdown => output::render_suggestions_markdown(&request.query, &suggestions),
                OutputFormat::Json => output::render_suggestions_json(&suggestions)? + "\n",
            })
        }
    }
}

/// Build the fetcher for the selected source; remote catalogs get retries
async fn open_catalog(
    source: &SourceArgs,
    auth: &RemoteAuthArgs,
    config: &SearchConfig,
) -> Result<Box<dyn CandidateFetcher>, SearchError> {
    if let Some(path) = &source.catalog {
        let catalog = InMemoryCatalog::load(path).await?;
        info!("Loaded {} products from {}", catalog.len(), path.display());
        return Ok(Box::new(catalog));
    }

    let Some(url) = &source.remote_url else {
        return Err(SearchError::InvalidInput(
            "Either --catalog or --remote-url is required".to_string(),
        ));
    };
    let remote = RemoteCatalog::new(
        url,
        auth.api_key.clone(),
        Duration::from_secs(config.fetch_timeout_secs),
    )?;
    Ok(Box::new(RetryingFetcher::new(remote, config.retry.clone())))
}

/// Bound a whole search, retries included, by the configured fetch timeout
async fn with_timeout<T>(
    config: &SearchConfig,
    fut: impl Future<Output = Result<T, SearchError>>,
) -> Result<T, SearchError> {
    let secs = config.fetch_timeout_secs;
    match timeout(Duration::from_secs(secs), fut).await {
        Ok(result) => result,
        Err(_) => Err(SearchError::FetchFailed(FetchError::Timeout(format!(
            "Search exceeded {} second timeout",
            secs
        )))),
    }
}

/// Map errors to exit codes
fn get_exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<SearchError>() {
        Some(SearchError::InvalidInput(_)) | Some(SearchError::InvalidPage { .. }) => 1,
        Some(SearchError::FetchFailed(FetchError::Timeout(_))) => 4,
        Some(SearchError::FetchFailed(_)) => 2,
        _ => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let invalid_page = anyhow::Error::new(SearchError::InvalidPage {
            requested: 9,
            total_pages: 2,
        });
        assert_eq!(get_exit_code(&invalid_page), 1);

        let unavailable = anyhow::Error::new(SearchError::FetchFailed(FetchError::Unavailable(
            "down".to_string(),
        )));
        assert_eq!(get_exit_code(&unavailable), 2);

        let timed_out = anyhow::Error::new(SearchError::FetchFailed(FetchError::Timeout(
            "slow".to_string(),
        )));
        assert_eq!(get_exit_code(&timed_out), 4);

        assert_eq!(get_exit_code(&anyhow::anyhow!("config broken")), 5);
    }

    #[tokio::test]
    async fn test_timeout_maps_to_fetch_timeout() {
        let config = SearchConfig {
            fetch_timeout_secs: 0,
            ..SearchConfig::default()
        };
        let result: Result<(), SearchError> = with_timeout(&config, async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(())
        })
        .await;
        assert!(matches!(
            result,
            Err(SearchError::FetchFailed(FetchError::Timeout(_)))
        ));
    }

    #[tokio::test]
    async fn test_search_against_local_catalog() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "1", "name": "Garbanzos", "price": 1.2}}, {{"id": "2", "name": "Leche"}}]"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from([
            "product-search",
            "search",
            "--catalog",
            path.as_str(),
            "-q",
            "garbano",
            "--config",
            "/nonexistent/product-search.json",
        ])
        .unwrap();

        let output = run(cli).await.unwrap();
        assert!(output.contains("Did you mean: garbanzos?"));
        assert!(output.contains("1. Garbanzos · 1.20 _(fuzzy)_"));
    }
}
