//! Scrape command - one scheduled run of the incremental scraper

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use crate::config::ScraperConfig;
use crate::domain::scraper::ScrapeOptions;
use crate::infrastructure::http::HttpClient;
use crate::infrastructure::scraper::IncrementalScraper;
use crate::infrastructure::storage::S3ObjectStore;
use crate::infrastructure::web_search::TavilySearch;

#[derive(Debug, Clone, Args)]
pub struct ScrapeArgs {
    /// Destination bucket (overrides `scraper.bucket`)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Store documents even when their content is unchanged
    #[arg(long)]
    pub force_update: bool,

    /// Search query; repeat to run several
    #[arg(long)]
    pub query: Vec<String>,

    /// Results requested per query
    #[arg(long)]
    pub max_results: Option<u32>,
}

pub async fn run(args: ScrapeArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();

    let bucket = args
        .bucket
        .clone()
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| config.scraper.bucket.clone());
    if bucket.is_empty() {
        anyhow::bail!("No scraper bucket configured; pass --bucket or set APP__SCRAPER__BUCKET");
    }
    if !config.web_search.is_configured() {
        anyhow::bail!("Web search API key is required for scraping");
    }

    let http = HttpClient::with_timeout(Duration::from_secs(config.web_search.timeout_secs))
        .context("building HTTP client")?;
    let search = TavilySearch::new(http, config.web_search.api_key.clone())
        .with_base_url(config.web_search.base_url.clone());

    let sdk_config = crate::load_aws_config(&config).await;
    let store = S3ObjectStore::new(&sdk_config, bucket.clone(), config.aws.region.clone());

    let scraper = IncrementalScraper::new(Arc::new(search), Arc::new(store));
    let options = scrape_options(&config.scraper, &args);

    info!(
        bucket = %bucket,
        queries = options.search_queries.len(),
        force_update = options.force_update,
        "Starting incremental scrape"
    );

    let result = scraper.run(&options).await;

    if !result.errors.is_empty() {
        warn!(errors = result.errors.len(), "Scrape finished with errors");
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Config values overridden by command line flags
fn scrape_options(config: &ScraperConfig, args: &ScrapeArgs) -> ScrapeOptions {
    let queries = if args.query.is_empty() {
        config.queries.clone()
    } else {
        args.query.clone()
    };

    ScrapeOptions::default()
        .with_search_queries(queries)
        .with_max_results_per_query(args.max_results.unwrap_or(config.max_results_per_query))
        .with_object_prefix(config.object_prefix.clone())
        .with_tracker_key(config.tracker_key.clone())
        .with_force_update(args.force_update)
        .with_pacing(Duration::from_millis(config.pacing_ms))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn args() -> ScrapeArgs {
        ScrapeArgs {
            bucket: None,
            force_update: false,
            query: Vec::new(),
            max_results: None,
        }
    }

    #[test]
    fn test_defaults_come_from_config() {
        let config = AppConfig::default().scraper;
        let options = scrape_options(&config, &args());

        assert_eq!(options.search_queries, ScrapeOptions::default().search_queries);
        assert_eq!(options.max_results_per_query, config.max_results_per_query);
        assert_eq!(options.tracker_key, config.tracker_key);
        assert!(!options.force_update);
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = AppConfig::default().scraper;
        config.queries = vec!["diabetes diet".to_string()];
        config.pacing_ms = 0;

        let args = ScrapeArgs {
            force_update: true,
            query: vec!["gestational diabetes".to_string()],
            max_results: Some(2),
            ..args()
        };
        let options = scrape_options(&config, &args);

        assert_eq!(options.search_queries, vec!["gestational diabetes"]);
        assert_eq!(options.max_results_per_query, 2);
        assert!(options.force_update);
        assert_eq!(options.pacing, Duration::ZERO);
    }
}
