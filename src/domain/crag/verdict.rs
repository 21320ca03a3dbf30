//! Relevance verdict returned to the agent

use serde::{Deserialize, Serialize};

/// Scores strictly above this are relevant
pub const RELEVANCE_THRESHOLD: f32 = 0.5;

/// Value reported when scoring could not run
pub const FAIL_OPEN_VALUE: f32 = 0.5;

/// Binary relevance label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelevanceLabel {
    Yes,
    No,
}

impl RelevanceLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    pub fn is_relevant(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// Outcome of checking retrieved passages against a question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceVerdict {
    pub chunk_relevance_score: RelevanceLabel,
    pub chunk_relevance_value: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelevanceVerdict {
    /// Verdict for a computed precision value
    pub fn from_value(value: f32) -> Self {
        let value = value.clamp(0.0, 1.0);
        let label = if value > RELEVANCE_THRESHOLD {
            RelevanceLabel::Yes
        } else {
            RelevanceLabel::No
        };

        Self {
            chunk_relevance_score: label,
            chunk_relevance_value: value,
            error: None,
        }
    }

    /// Verdict used when validation or scoring failed. Treated as relevant so
    /// a scoring outage never forces a web search.
    pub fn fail_open(error: impl Into<String>) -> Self {
        Self {
            chunk_relevance_score: RelevanceLabel::Yes,
            chunk_relevance_value: FAIL_OPEN_VALUE,
            error: Some(error.into()),
        }
    }

    pub fn is_relevant(&self) -> bool {
        self.chunk_relevance_score.is_relevant()
    }

    pub fn is_fail_open(&self) -> bool {
        self.error.is_some()
    }
}
