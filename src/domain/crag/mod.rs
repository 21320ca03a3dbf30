//! Corrective RAG domain
//!
//! Decides whether retrieved passages are good enough to answer a question
//! or whether the assistant should fall back to web search.

mod extraction;
mod precision;
mod scorer;
mod verdict;

pub use extraction::{
    extract_passages, has_score_markers, validate_relevance_input, RelevanceError, CONTENT_MARKER,
    SCORE_MARKER,
};
pub use precision::average_precision;
pub use scorer::ContextPrecisionScorer;
pub use verdict::{RelevanceLabel, RelevanceVerdict, FAIL_OPEN_VALUE, RELEVANCE_THRESHOLD};

#[cfg(test)]
pub use scorer::mock::MockContextPrecisionScorer;
