//! Tavily search API provider

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::web_search::{WebSearchProvider, WebSearchRequest, WebSearchResult};
use crate::domain::DomainError;
use crate::infrastructure::http::{HttpClient, HttpClientTrait};

const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

/// Tavily `/search` client
#[derive(Debug)]
pub struct TavilySearch<C: HttpClientTrait = HttpClient> {
    client: C,
    api_key: String,
    base_url: String,
}

impl<C: HttpClientTrait> TavilySearch<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn build_body(&self, request: &WebSearchRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "api_key": self.api_key,
            "query": request.query,
            "search_depth": request.search_depth,
            "include_answer": false,
            "include_raw_content": request.include_raw_content,
            "max_results": request.max_results,
        });

        if !request.include_domains.is_empty() {
            body["include_domains"] = serde_json::json!(request.include_domains);
        }

        body
    }
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<WebSearchResult>,
}

#[async_trait]
impl<C: HttpClientTrait> WebSearchProvider for TavilySearch<C> {
    async fn search(&self, request: WebSearchRequest) -> Result<Vec<WebSearchResult>, DomainError> {
        let url = format!("{}/search", self.base_url);
        let body = self.build_body(&request);

        let response = self
            .client
            .post_json(&url, vec![("Content-Type", "application/json")], &body)
            .await
            .map_err(|e| DomainError::web_search(e.to_string()))?;

        let parsed: TavilyResponse = serde_json::from_value(response).map_err(|e| {
            DomainError::web_search(format!("Failed to parse Tavily response: {}", e))
        })?;

        debug!(
            query = %request.query,
            results = parsed.results.len(),
            "Tavily search complete"
        );

        Ok(parsed.results)
    }

    fn provider_name(&self) -> &'static str {
        "tavily"
    }
}
