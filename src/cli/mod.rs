//! Command line entry points
//!
//! - `serve`: HTTP API for the assistant tools
//! - `scrape`: one incremental knowledge base scrape run
//! - `freshness`: check whether a page changed since it was last stored

pub mod freshness;
pub mod scrape;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Diabetes assistant toolkit - corrective RAG tools and knowledge base scraper
#[derive(Debug, Parser)]
#[command(name = "diabetes-crag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve,

    /// Run one incremental scrape of WebMD diabetes articles
    Scrape(scrape::ScrapeArgs),

    /// Check whether a page changed against a stored content hash
    Freshness(freshness::FreshnessArgs),
}

/// Load `.env`, the layered config, and install logging
pub(crate) fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration, using defaults: {}", e);
            let mut config = AppConfig::default();
            config.apply_legacy_env(|key| std::env::var(key).ok());
            config
        }
    };

    logging::init_logging(&config.logging);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scrape_flags() {
        let cli = Cli::try_parse_from([
            "diabetes-crag",
            "scrape",
            "--bucket",
            "kb-bucket",
            "--force-update",
            "--query",
            "type 1 diabetes",
            "--query",
            "insulin pump",
            "--max-results",
            "3",
        ])
        .unwrap();

        let Command::Scrape(args) = cli.command else {
            panic!("expected scrape command");
        };
        assert_eq!(args.bucket.as_deref(), Some("kb-bucket"));
        assert!(args.force_update);
        assert_eq!(args.query, vec!["type 1 diabetes", "insulin pump"]);
        assert_eq!(args.max_results, Some(3));
    }

    #[test]
    fn test_parse_freshness() {
        let cli = Cli::try_parse_from([
            "diabetes-crag",
            "freshness",
            "https://www.webmd.com/diabetes/a",
            "--hash",
            "abc",
        ])
        .unwrap();

        let Command::Freshness(args) = cli.command else {
            panic!("expected freshness command");
        };
        assert_eq!(args.url, "https://www.webmd.com/diabetes/a");
        assert_eq!(args.hash.as_deref(), Some("abc"));
    }

    #[test]
    fn test_serve_takes_no_arguments() {
        assert!(Cli::try_parse_from(["diabetes-crag", "serve", "--port", "1"]).is_err());
    }
}
