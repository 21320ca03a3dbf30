//! Knowledge base provider trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::entity::{RetrievalParams, SearchResult};
use crate::domain::error::DomainError;

/// Read access to a managed vector knowledge base
#[async_trait]
pub trait KnowledgeBaseProvider: Send + Sync + Debug {
    /// Identifier of the backing knowledge base
    fn knowledge_base_id(&self) -> &str;

    /// Get the provider type name
    fn provider_type(&self) -> &'static str;

    /// Retrieve ranked passages for a query
    async fn retrieve(&self, params: RetrievalParams) -> Result<Vec<SearchResult>, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock knowledge base provider for testing
    #[derive(Debug, Default)]
    pub struct MockKnowledgeBaseProvider {
        results: Vec<SearchResult>,
        error: Option<String>,
        retrieve_count: AtomicUsize,
        last_params: Mutex<Option<RetrievalParams>>,
    }

    impl MockKnowledgeBaseProvider {
        pub fn new() -> Self {
            Self::default()
        }

        /// Results returned for every query
        pub fn with_results(mut self, results: Vec<SearchResult>) -> Self {
            self.results = results;
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn retrieve_count(&self) -> usize {
            self.retrieve_count.load(Ordering::SeqCst)
        }

        pub fn last_params(&self) -> Option<RetrievalParams> {
            self.last_params.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl KnowledgeBaseProvider for MockKnowledgeBaseProvider {
        fn knowledge_base_id(&self) -> &str {
            "mock-kb"
        }

        fn provider_type(&self) -> &'static str {
            "mock"
        }

        async fn retrieve(
            &self,
            params: RetrievalParams,
        ) -> Result<Vec<SearchResult>, DomainError> {
            self.retrieve_count.fetch_add(1, Ordering::SeqCst);
            *self.last_params.lock().unwrap() = Some(params);

            if let Some(ref error) = self.error {
                return Err(DomainError::knowledge_base(error.clone()));
            }

            Ok(self.results.clone())
        }
    }
}
