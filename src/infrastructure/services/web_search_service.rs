//! Medical web search fallback rendered for the agent

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::web_search::{
    format_web_results, medical_search_request, web_search_error_message, WebSearchProvider,
    WEB_SEARCH_NOT_CONFIGURED_MESSAGE,
};
use crate::infrastructure::observability::record_web_fallback;

/// Searches authoritative medical sites when the knowledge base falls short
#[derive(Clone)]
pub struct MedicalWebSearchService {
    provider: Option<Arc<dyn WebSearchProvider>>,
}

impl std::fmt::Debug for MedicalWebSearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MedicalWebSearchService")
            .field("provider", &self.provider.as_ref().map(|p| p.provider_name()))
            .finish()
    }
}

impl MedicalWebSearchService {
    /// A `None` provider means no API key was configured
    pub fn new(provider: Option<Arc<dyn WebSearchProvider>>) -> Self {
        Self { provider }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Formatted results for a query. Failures come back as a message.
    pub async fn search(&self, query: &str) -> String {
        let Some(provider) = &self.provider else {
            return WEB_SEARCH_NOT_CONFIGURED_MESSAGE.to_string();
        };

        match provider.search(medical_search_request(query)).await {
            Ok(results) => {
                info!(
                    provider = provider.provider_name(),
                    results = results.len(),
                    "Medical web search complete"
                );
                record_web_fallback(true);
                format_web_results(&results)
            }
            Err(e) => {
                warn!(error = %e, "Medical web search failed");
                record_web_fallback(false);
                web_search_error_message(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::web_search::{MockWebSearchProvider, WebSearchResult, MEDICAL_DOMAINS};
    use crate::domain::DomainError;

    #[tokio::test]
    async fn test_not_configured() {
        let service = MedicalWebSearchService::new(None);

        assert!(!service.is_configured());
        assert_eq!(service.search("a1c").await, WEB_SEARCH_NOT_CONFIGURED_MESSAGE);
    }

    #[tokio::test]
    async fn test_search_targets_medical_domains() {
        let mut provider = MockWebSearchProvider::new();
        provider
            .expect_search()
            .withf(|request| {
                request.query == "gestational diabetes diet"
                    && request.max_results == 3
                    && request.include_domains.len() == MEDICAL_DOMAINS.len()
            })
            .times(1)
            .returning(|_| {
                Ok(vec![WebSearchResult::new("https://www.cdc.gov/diabetes", "Eat regularly.")
                    .with_title("Gestational Diabetes")
                    .with_score(0.9)])
            });
        provider.expect_provider_name().return_const("mock");

        let service = MedicalWebSearchService::new(Some(Arc::new(provider)));
        let text = service.search("gestational diabetes diet").await;

        assert!(text.starts_with("**Web Search Results:**"));
        assert!(text.contains("**Source 1** (relevance: 0.90)"));
        assert!(text.contains("**Title:** Gestational Diabetes"));
        assert!(text.contains("*Reference: https://www.cdc.gov/diabetes*"));
    }

    #[tokio::test]
    async fn test_error_becomes_message() {
        let mut provider = MockWebSearchProvider::new();
        provider
            .expect_search()
            .returning(|_| Err(DomainError::web_search("timed out")));

        let service = MedicalWebSearchService::new(Some(Arc::new(provider)));

        assert_eq!(
            service.search("q").await,
            "Error performing medical web search: Web search error: timed out"
        );
    }
}
