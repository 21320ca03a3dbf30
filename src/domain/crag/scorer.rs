//! Context precision scoring seam

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Scores how useful a ranked list of passages is for a question
#[async_trait]
pub trait ContextPrecisionScorer: Send + Sync + Debug {
    /// Return a precision value in `[0, 1]`
    async fn score(&self, question: &str, passages: &[String]) -> Result<f32, DomainError>;

    /// Get the scorer name
    fn scorer_name(&self) -> &'static str;
}
