//! Web search provider trait and request types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// How thoroughly the search backend crawls for each query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    #[default]
    Basic,
    Advanced,
}

/// A single web search call
#[derive(Debug, Clone, PartialEq)]
pub struct WebSearchRequest {
    pub query: String,
    pub max_results: u32,
    pub search_depth: SearchDepth,
    /// Domains the backend should restrict itself to
    pub include_domains: Vec<String>,
    /// Ask for the full page text alongside the snippet
    pub include_raw_content: bool,
}

impl WebSearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: 5,
            search_depth: SearchDepth::default(),
            include_domains: Vec::new(),
            include_raw_content: false,
        }
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_search_depth(mut self, search_depth: SearchDepth) -> Self {
        self.search_depth = search_depth;
        self
    }

    pub fn with_include_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_raw_content(mut self, include: bool) -> Self {
        self.include_raw_content = include;
        self
    }
}

/// One hit from the search backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebSearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub raw_content: Option<String>,
}

impl WebSearchResult {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_raw_content(mut self, raw_content: impl Into<String>) -> Self {
        self.raw_content = Some(raw_content.into());
        self
    }

    /// Full page text when present, otherwise the snippet
    pub fn best_content(&self) -> &str {
        match self.raw_content.as_deref() {
            Some(raw) if !raw.is_empty() => raw,
            _ => &self.content,
        }
    }
}

/// Search engine used for the web fallback and for scraping
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WebSearchProvider: Send + Sync {
    /// Run one search
    async fn search(&self, request: WebSearchRequest) -> Result<Vec<WebSearchResult>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
