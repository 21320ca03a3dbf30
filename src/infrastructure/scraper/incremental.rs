//! Incremental scrape run over the search backend into the object store

use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use tracing::{info, warn};

use crate::domain::scraper::{
    document_object_key, md5_hex, select_candidates, site_query, ChangeKind, ContentTracker,
    IncrementalScrapingResult, ScrapeCandidate, ScrapeOptions, ScrapedDocument,
    NEXT_RUN_INTERVAL_DAYS, SCRAPE_SITE,
};
use crate::domain::storage::{ObjectStore, StoredObject};
use crate::domain::web_search::{SearchDepth, WebSearchProvider, WebSearchRequest};
use crate::domain::DomainError;
use crate::infrastructure::observability::record_scraper_document;

/// Source of the current time
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Stores new and changed articles and keeps the tracker current
pub struct IncrementalScraper {
    search: Arc<dyn WebSearchProvider>,
    store: Arc<dyn ObjectStore>,
    clock: Clock,
}

impl std::fmt::Debug for IncrementalScraper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncrementalScraper")
            .field("search", &self.search.provider_name())
            .field("store", &self.store)
            .finish()
    }
}

enum StoreOutcome {
    Stored(String),
    Skipped,
}

impl IncrementalScraper {
    pub fn new(search: Arc<dyn WebSearchProvider>, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            search,
            store,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Read the tracker; a missing or unreadable object yields a fresh one
    pub async fn load_tracker(&self, tracker_key: &str) -> ContentTracker {
        match self.store.get_object(tracker_key).await {
            Ok(Some(bytes)) => match ContentTracker::from_json(&bytes) {
                Ok(tracker) => tracker,
                Err(e) => {
                    warn!(tracker_key, error = %e, "Corrupt tracker, starting fresh");
                    ContentTracker::fresh(self.now())
                }
            },
            Ok(None) => {
                info!(tracker_key, "No tracker found, starting fresh");
                ContentTracker::fresh(self.now())
            }
            Err(e) => {
                warn!(tracker_key, error = %e, "Could not read tracker, starting fresh");
                ContentTracker::fresh(self.now())
            }
        }
    }

    pub async fn save_tracker(
        &self,
        tracker: &ContentTracker,
        tracker_key: &str,
    ) -> Result<(), DomainError> {
        let body = tracker.to_json()?;
        self.store
            .put_object(StoredObject::json(tracker_key, body))
            .await
    }

    fn search_request(query: &str, options: &ScrapeOptions) -> WebSearchRequest {
        WebSearchRequest::new(site_query(query))
            .with_max_results(options.max_results_per_query)
            .with_search_depth(SearchDepth::Advanced)
            .with_include_domains([SCRAPE_SITE])
            .with_raw_content(true)
    }

    /// Run one incremental scrape.
    ///
    /// Search and per-document failures are collected in `errors`; the run
    /// itself never fails.
    pub async fn run(&self, options: &ScrapeOptions) -> IncrementalScrapingResult {
        let mut tracker = self.load_tracker(&options.tracker_key).await;
        let mut result = IncrementalScrapingResult::default();

        info!(
            queries = options.search_queries.len(),
            known_documents = tracker.total_documents,
            force_update = options.force_update,
            "Starting incremental scrape"
        );

        for query in &options.search_queries {
            let hits = match self.search.search(Self::search_request(query, options)).await {
                Ok(hits) => hits,
                Err(e) => {
                    warn!(query = %query, error = %e, "Search failed");
                    result
                        .errors
                        .push(format!("Search failed for '{}': {}", query, e));
                    continue;
                }
            };

            let candidates = select_candidates(hits, &tracker);
            result.new_documents_found +=
                candidates.iter().filter(|c| c.change.is_fresh()).count() as u32;

            for candidate in candidates {
                let url = candidate.result.url.clone().unwrap_or_default();
                if url.is_empty() {
                    continue;
                }

                match self
                    .store_candidate(&candidate, query, options, &mut tracker)
                    .await
                {
                    Ok(StoreOutcome::Skipped) => {
                        result.skipped_existing += 1;
                        record_scraper_document("skipped");
                    }
                    Ok(StoreOutcome::Stored(key)) => {
                        if candidate.change != ChangeKind::New {
                            info!(url = %url, "Updated");
                            result.updated_documents += 1;
                            result.s3_objects_updated.push(key);
                            record_scraper_document("stored_updated");
                        } else {
                            info!(url = %url, "New");
                            result.new_documents_scraped += 1;
                            result.s3_objects_created.push(key);
                            record_scraper_document("stored_new");
                        }

                        if !options.pacing.is_zero() {
                            tokio::time::sleep(options.pacing).await;
                        }
                    }
                    Err(e) => {
                        warn!(url = %url, error = %e, "Failed to store document");
                        result.errors.push(format!("Error processing {}: {}", url, e));
                        record_scraper_document("error");
                    }
                }
            }
        }

        let finished_at = self.now();
        tracker.mark_run(finished_at);

        if let Err(e) = self.save_tracker(&tracker, &options.tracker_key).await {
            warn!(error = %e, "Failed to save tracker");
            result.errors.push(format!("Failed to save tracker: {}", e));
        }

        result.next_run_scheduled =
            (finished_at + ChronoDuration::days(NEXT_RUN_INTERVAL_DAYS)).to_rfc3339();

        info!(
            created = result.s3_objects_created.len(),
            updated = result.s3_objects_updated.len(),
            skipped = result.skipped_existing,
            errors = result.errors.len(),
            "Incremental scrape finished"
        );

        result
    }

    async fn store_candidate(
        &self,
        candidate: &ScrapeCandidate,
        query: &str,
        options: &ScrapeOptions,
        tracker: &mut ContentTracker,
    ) -> Result<StoreOutcome, DomainError> {
        let hit = &candidate.result;
        let url = hit.url.as_deref().unwrap_or_default();
        let url_hash = md5_hex(url);
        let content = hit.best_content();
        let content_hash = md5_hex(content);

        if !options.force_update && tracker.is_known_content(&content_hash) {
            return Ok(StoreOutcome::Skipped);
        }

        let scraped_at = self.now();
        let title = hit.title.as_deref().unwrap_or_default();
        let key = document_object_key(&options.object_prefix, scraped_at, &url_hash, title);

        let document = ScrapedDocument::new(
            url,
            title,
            content,
            content_hash.clone(),
            candidate.change,
            query,
            scraped_at,
        );

        let body = serde_json::to_vec_pretty(&document)
            .map_err(|e| DomainError::internal(format!("Failed to serialize document: {}", e)))?;

        let object = StoredObject::json(key.clone(), body)
            .with_metadata("source-url", url)
            .with_metadata("content-hash", content_hash.as_str())
            .with_metadata("scraped-at", document.scraped_at.as_str());

        self.store.put_object(object).await?;
        tracker.record_stored(url_hash, content_hash);

        Ok(StoreOutcome::Stored(key))
    }
}
