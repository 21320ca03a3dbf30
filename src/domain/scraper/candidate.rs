//! Selection of search hits worth storing

use super::hashing::md5_hex;
use super::tracker::ContentTracker;
use crate::domain::web_search::WebSearchResult;

/// Site the scraper collects from
pub const SCRAPE_SITE: &str = "webmd.com";

/// Why a hit was selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// URL never stored before
    New,
    /// Known URL whose content changed
    Updated,
    /// Known URL with content already stored
    Unchanged,
}

impl ChangeKind {
    /// Whether the hit adds something the tracker has not seen
    pub fn is_fresh(self) -> bool {
        self != ChangeKind::Unchanged
    }
}

/// A search hit selected for storage
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeCandidate {
    pub result: WebSearchResult,
    pub change: ChangeKind,
}

/// Query sent to the search backend for one topic
pub fn site_query(topic: &str) -> String {
    format!("site:{SCRAPE_SITE} {topic} diabetes")
}

/// Classify on-site hits against the tracker.
///
/// Off-site hits are dropped. Known URLs with stored content are kept as
/// `Unchanged` so the caller can count them as skipped or rewrite them.
pub fn select_candidates(
    results: Vec<WebSearchResult>,
    tracker: &ContentTracker,
) -> Vec<ScrapeCandidate> {
    results
        .into_iter()
        .filter_map(|result| {
            let url = result.url.clone().unwrap_or_default();
            if !url.to_lowercase().contains(SCRAPE_SITE) {
                return None;
            }

            if tracker.is_known_url(&md5_hex(&url)) {
                let content_hash = md5_hex(result.best_content());
                let change = if tracker.is_known_content(&content_hash) {
                    ChangeKind::Unchanged
                } else {
                    ChangeKind::Updated
                };
                return Some(ScrapeCandidate { result, change });
            }

            Some(ScrapeCandidate {
                result,
                change: ChangeKind::New,
            })
        })
        .collect()
}
