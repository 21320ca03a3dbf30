//! Incremental knowledge base scraper and page freshness checks

mod freshness;
mod incremental;

pub use freshness::{extract_main_text, PageFreshnessChecker};
pub use incremental::{Clock, IncrementalScraper};
