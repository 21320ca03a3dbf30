//! Corrective RAG infrastructure
//!
//! The LLM-judged context precision metric and the fail-open relevance
//! check built on top of it.

mod context_precision;
mod relevance_checker;

pub use context_precision::LlmContextPrecisionScorer;
pub use relevance_checker::RelevanceChecker;
