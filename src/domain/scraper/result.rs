//! Scrape run options and outcome

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::tracker::DEFAULT_TRACKER_KEY;

pub const DEFAULT_OBJECT_PREFIX: &str = "diabetes-webmd";
pub const DEFAULT_MAX_RESULTS_PER_QUERY: u32 = 10;
pub const DEFAULT_PACING: Duration = Duration::from_secs(1);
pub const NEXT_RUN_INTERVAL_DAYS: i64 = 7;

/// Topics searched when none are configured
pub const DEFAULT_SEARCH_QUERIES: [&str; 10] = [
    "diabetes symptoms",
    "diabetes treatment",
    "diabetes diet nutrition",
    "type 1 diabetes",
    "type 2 diabetes",
    "diabetes complications",
    "diabetes prevention",
    "diabetes medication",
    "diabetes blood sugar",
    "diabetes exercise",
];

/// Parameters of one incremental scrape run
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeOptions {
    pub search_queries: Vec<String>,
    pub max_results_per_query: u32,
    pub object_prefix: String,
    pub tracker_key: String,
    /// Store even when the content hash is already tracked
    pub force_update: bool,
    /// Delay after each stored document
    pub pacing: Duration,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            search_queries: DEFAULT_SEARCH_QUERIES.iter().map(|q| q.to_string()).collect(),
            max_results_per_query: DEFAULT_MAX_RESULTS_PER_QUERY,
            object_prefix: DEFAULT_OBJECT_PREFIX.to_string(),
            tracker_key: DEFAULT_TRACKER_KEY.to_string(),
            force_update: false,
            pacing: DEFAULT_PACING,
        }
    }
}

impl ScrapeOptions {
    pub fn with_search_queries(mut self, queries: Vec<String>) -> Self {
        if !queries.is_empty() {
            self.search_queries = queries;
        }
        self
    }

    pub fn with_max_results_per_query(mut self, max_results: u32) -> Self {
        self.max_results_per_query = max_results;
        self
    }

    pub fn with_object_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.object_prefix = prefix.into();
        self
    }

    pub fn with_tracker_key(mut self, key: impl Into<String>) -> Self {
        self.tracker_key = key.into();
        self
    }

    pub fn with_force_update(mut self, force_update: bool) -> Self {
        self.force_update = force_update;
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }
}

/// Summary of one incremental scrape run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementalScrapingResult {
    pub new_documents_found: u32,
    pub new_documents_scraped: u32,
    pub updated_documents: u32,
    pub skipped_existing: u32,
    pub s3_objects_created: Vec<String>,
    pub s3_objects_updated: Vec<String>,
    pub errors: Vec<String>,
    pub next_run_scheduled: String,
}

impl IncrementalScrapingResult {
    /// Number of objects written during the run
    pub fn objects_written(&self) -> usize {
        self.s3_objects_created.len() + self.s3_objects_updated.len()
    }
}
