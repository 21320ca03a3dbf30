//! Freshness command - compare a live page to a stored hash

use std::time::Duration;

use clap::Args;

use crate::infrastructure::http::HttpClient;
use crate::infrastructure::scraper::PageFreshnessChecker;

#[derive(Debug, Clone, Args)]
pub struct FreshnessArgs {
    /// Page to check
    pub url: String,

    /// MD5 of the previously stored main text
    #[arg(long)]
    pub hash: Option<String>,
}

pub async fn run(args: FreshnessArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();

    let checker = PageFreshnessChecker::new(HttpClient::new()).with_timeouts(
        Duration::from_secs(config.scraper.head_timeout_secs),
        Duration::from_secs(config.scraper.fetch_timeout_secs),
    );

    let freshness = checker.check(&args.url, args.hash.as_deref()).await;

    println!("{}", serde_json::to_string_pretty(&freshness)?);
    Ok(())
}
