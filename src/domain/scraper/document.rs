//! Documents written to the knowledge base bucket

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::candidate::ChangeKind;

pub const DOCUMENT_SOURCE: &str = "webmd";
pub const DOCUMENT_TOPIC: &str = "diabetes";
pub const SCRAPER_NAME: &str = "incremental-diabetes-scraper";

const TITLE_PREFIX_CHARS: usize = 50;

/// Provenance attached to every stored document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub source: String,
    pub topic: String,
    pub scraper: String,
    pub search_query: String,
    pub is_update: bool,
    pub is_new: bool,
}

/// JSON body of one scraped article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedDocument {
    pub url: String,
    pub title: String,
    pub content: String,
    pub scraped_at: String,
    pub content_hash: String,
    pub is_update: bool,
    pub is_new: bool,
    pub metadata: DocumentMetadata,
}

impl ScrapedDocument {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        content_hash: impl Into<String>,
        change: ChangeKind,
        search_query: impl Into<String>,
        scraped_at: DateTime<Utc>,
    ) -> Self {
        let is_update = change == ChangeKind::Updated;
        let is_new = change == ChangeKind::New;

        Self {
            url: url.into(),
            title: title.into(),
            content: content.into(),
            scraped_at: scraped_at.to_rfc3339(),
            content_hash: content_hash.into(),
            is_update,
            is_new,
            metadata: DocumentMetadata {
                source: DOCUMENT_SOURCE.to_string(),
                topic: DOCUMENT_TOPIC.to_string(),
                scraper: SCRAPER_NAME.to_string(),
                search_query: search_query.into(),
                is_update,
                is_new,
            },
        }
    }
}

/// Filesystem-safe slug from the start of an article title
pub fn clean_title(title: &str) -> String {
    title
        .chars()
        .take(TITLE_PREFIX_CHARS)
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}

/// `{prefix}/{YYYYMMDD_HHMMSS}_{url_hash[..8]}_{clean_title}.json`
pub fn document_object_key(
    prefix: &str,
    scraped_at: DateTime<Utc>,
    url_hash: &str,
    title: &str,
) -> String {
    let short_hash: String = url_hash.chars().take(8).collect();

    format!(
        "{}/{}_{}_{}.json",
        prefix,
        scraped_at.format("%Y%m%d_%H%M%S"),
        short_hash,
        clean_title(title)
    )
}
