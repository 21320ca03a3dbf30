//! Knowledge base domain
//!
//! Retrieval of diabetes reference passages and their rendering into the
//! scored source blocks the relevance check reads.

mod entity;
mod format;
mod provider;

pub use entity::{
    RetrievalParams, SearchResult, SearchType, DEFAULT_MIN_SCORE, DEFAULT_NUMBER_OF_RESULTS,
};
pub use format::{
    format_retrieval_results, kb_error_message, KB_NOT_CONFIGURED_MESSAGE,
    KB_NO_RELEVANT_RESULTS_MESSAGE, KB_NO_RESULTS_MESSAGE,
};
pub use provider::KnowledgeBaseProvider;

#[cfg(test)]
pub use provider::mock::MockKnowledgeBaseProvider;
