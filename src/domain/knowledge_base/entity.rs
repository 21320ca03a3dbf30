//! Knowledge base retrieval types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Number of passages requested per retrieval
pub const DEFAULT_NUMBER_OF_RESULTS: u32 = 5;

/// Passages scoring below this are dropped before formatting
pub const DEFAULT_MIN_SCORE: f32 = 0.5;

/// A passage returned by the knowledge base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Unique identifier of the chunk
    pub id: String,
    /// Passage text
    pub content: String,
    /// Similarity score reported by the knowledge base
    pub score: f32,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
    /// Location of the source document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl SearchResult {
    /// Create a new search result
    pub fn new(id: impl Into<String>, content: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            score,
            metadata: HashMap::new(),
            source: None,
        }
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Set all metadata
    pub fn with_all_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set source
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// How the knowledge base combines vector and keyword matching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchType {
    #[default]
    Hybrid,
    Semantic,
}

/// Parameters for a single retrieval
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalParams {
    /// Query text, sent verbatim
    pub query: String,
    pub number_of_results: u32,
    pub search_type: SearchType,
}

impl RetrievalParams {
    /// Create parameters with the default result count and hybrid search
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            number_of_results: DEFAULT_NUMBER_OF_RESULTS,
            search_type: SearchType::default(),
        }
    }

    pub fn with_number_of_results(mut self, number_of_results: u32) -> Self {
        self.number_of_results = number_of_results;
        self
    }

    pub fn with_search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }
}
