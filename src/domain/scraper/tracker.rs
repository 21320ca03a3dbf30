//! Persisted record of previously stored content

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Default bucket key of the tracker object
pub const DEFAULT_TRACKER_KEY: &str = "diabetes-scraper/tracker.json";

/// Hashes of every URL and content body already written to the bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTracker {
    #[serde(default)]
    pub url_hashes: BTreeSet<String>,
    #[serde(default)]
    pub content_hashes: BTreeSet<String>,
    /// ISO-8601 timestamp of the last completed run
    pub last_run: String,
    #[serde(default)]
    pub total_documents: u64,
}

impl ContentTracker {
    /// Empty tracker stamped with the given time
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            url_hashes: BTreeSet::new(),
            content_hashes: BTreeSet::new(),
            last_run: now.to_rfc3339(),
            total_documents: 0,
        }
    }

    /// Parse the stored JSON form
    pub fn from_json(bytes: &[u8]) -> Result<Self, DomainError> {
        serde_json::from_slice(bytes)
            .map_err(|e| DomainError::validation(format!("Invalid tracker document: {}", e)))
    }

    /// Pretty-printed JSON form, sets as arrays
    pub fn to_json(&self) -> Result<Vec<u8>, DomainError> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| DomainError::internal(format!("Failed to serialize tracker: {}", e)))
    }

    pub fn is_known_url(&self, url_hash: &str) -> bool {
        self.url_hashes.contains(url_hash)
    }

    pub fn is_known_content(&self, content_hash: &str) -> bool {
        self.content_hashes.contains(content_hash)
    }

    /// Record a document that has been written to storage
    pub fn record_stored(&mut self, url_hash: impl Into<String>, content_hash: impl Into<String>) {
        self.url_hashes.insert(url_hash.into());
        self.content_hashes.insert(content_hash.into());
        self.total_documents += 1;
    }

    pub fn mark_run(&mut self, now: DateTime<Utc>) {
        self.last_run = now.to_rfc3339();
    }
}
