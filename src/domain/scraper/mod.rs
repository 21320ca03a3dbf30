//! Incremental scraper domain
//!
//! Tracks which articles already live in the knowledge base bucket so that
//! scheduled runs only store new or changed content.

mod candidate;
mod document;
mod freshness;
mod hashing;
mod result;
mod tracker;

pub use candidate::{select_candidates, site_query, ChangeKind, ScrapeCandidate, SCRAPE_SITE};
pub use document::{
    clean_title, document_object_key, DocumentMetadata, ScrapedDocument, DOCUMENT_SOURCE,
    DOCUMENT_TOPIC, SCRAPER_NAME,
};
pub use freshness::ContentFreshness;
pub use hashing::md5_hex;
pub use result::{
    IncrementalScrapingResult, ScrapeOptions, DEFAULT_MAX_RESULTS_PER_QUERY,
    DEFAULT_OBJECT_PREFIX, DEFAULT_PACING, DEFAULT_SEARCH_QUERIES, NEXT_RUN_INTERVAL_DAYS,
};
pub use tracker::{ContentTracker, DEFAULT_TRACKER_KEY};
