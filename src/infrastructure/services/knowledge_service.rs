//! Knowledge service - diabetes knowledge base lookups rendered for the agent

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::knowledge_base::{
    format_retrieval_results, kb_error_message, KnowledgeBaseProvider, RetrievalParams,
    DEFAULT_MIN_SCORE, DEFAULT_NUMBER_OF_RESULTS, KB_NOT_CONFIGURED_MESSAGE,
};

/// Queries the knowledge base and formats the passages as scored source blocks
#[derive(Debug, Clone)]
pub struct KnowledgeService {
    provider: Option<Arc<dyn KnowledgeBaseProvider>>,
    min_score: f32,
    number_of_results: u32,
}

impl KnowledgeService {
    /// A `None` provider means retrieval is not configured
    pub fn new(provider: Option<Arc<dyn KnowledgeBaseProvider>>) -> Self {
        Self {
            provider,
            min_score: DEFAULT_MIN_SCORE,
            number_of_results: DEFAULT_NUMBER_OF_RESULTS,
        }
    }

    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_number_of_results(mut self, number_of_results: u32) -> Self {
        self.number_of_results = number_of_results;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Retrieval text for a question. Failures come back as a message.
    pub async fn query(&self, question: &str) -> String {
        let Some(provider) = &self.provider else {
            return KB_NOT_CONFIGURED_MESSAGE.to_string();
        };

        let params =
            RetrievalParams::new(question).with_number_of_results(self.number_of_results);

        match provider.retrieve(params).await {
            Ok(results) => {
                info!(
                    knowledge_base_id = provider.knowledge_base_id(),
                    results = results.len(),
                    min_score = self.min_score,
                    "Knowledge base query complete"
                );
                format_retrieval_results(&results, self.min_score)
            }
            Err(e) => {
                warn!(error = %e, "Knowledge base query failed");
                kb_error_message(e)
            }
        }
    }
}
