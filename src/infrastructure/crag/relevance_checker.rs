//! Fail-open relevance check over formatted retrieval output

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::domain::crag::{
    extract_passages, has_score_markers, validate_relevance_input, ContextPrecisionScorer,
    RelevanceError, RelevanceVerdict,
};
use crate::infrastructure::observability::record_relevance_verdict;

/// Decides whether retrieved passages are good enough to answer a question
#[derive(Debug, Clone)]
pub struct RelevanceChecker {
    scorer: Arc<dyn ContextPrecisionScorer>,
}

impl RelevanceChecker {
    pub fn new(scorer: Arc<dyn ContextPrecisionScorer>) -> Self {
        Self { scorer }
    }

    /// Validate, extract and score, surfacing every failure
    pub async fn try_check(&self, results: &str, question: &str) -> Result<f32, RelevanceError> {
        validate_relevance_input(results, question)?;

        let passages = extract_passages(results).inspect_err(|_| {
            if has_score_markers(results) {
                warn!("Retrieval output has score markers but no content blocks; format mismatch");
            }
        })?;

        debug!(
            passages = passages.len(),
            scorer = self.scorer.scorer_name(),
            "Scoring retrieved passages"
        );

        let value = self
            .scorer
            .score(question, &passages)
            .await
            .map_err(|e| RelevanceError::scoring(e.to_string()))?;

        if !value.is_finite() {
            return Err(RelevanceError::scoring(format!(
                "Scorer returned a non-finite value: {}",
                value
            )));
        }

        Ok(value)
    }

    /// Verdict for the passages. Any failure yields the fail-open verdict.
    pub async fn check(&self, results: &str, question: &str) -> RelevanceVerdict {
        let start = Instant::now();

        let verdict = match self.try_check(results, question).await {
            Ok(value) => {
                let verdict = RelevanceVerdict::from_value(value);
                info!(
                    value = verdict.chunk_relevance_value,
                    verdict = verdict.chunk_relevance_score.as_str(),
                    "Relevance check complete"
                );
                verdict
            }
            Err(e) => {
                warn!(error = %e, "Relevance check failed, assuming relevant");
                RelevanceVerdict::fail_open(e.to_string())
            }
        };

        record_relevance_verdict(&verdict, start.elapsed());
        verdict
    }
}
