//! Context precision without reference, judged by an LLM
//!
//! Each passage gets a binary "was this useful for the question" verdict.
//! The verdicts are reduced with rank-weighted average precision.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::crag::{average_precision, ContextPrecisionScorer};
use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::DomainError;

const DEFAULT_MAX_TOKENS: u32 = 512;

const VERDICT_INSTRUCTIONS: &str = "Given a question and a context passage, verify if the \
context is useful for arriving at a correct answer to the question. Give the verdict as \"1\" \
if useful and \"0\" if not. Respond only with a JSON object of the form \
{\"reason\": \"<one sentence>\", \"verdict\": <0 or 1>}.";

/// Scores passages with one LLM judgement each
#[derive(Debug)]
pub struct LlmContextPrecisionScorer<P>
where
    P: LlmProvider + ?Sized,
{
    provider: Arc<P>,
    model: String,
    max_tokens: u32,
}

impl<P: LlmProvider + ?Sized> LlmContextPrecisionScorer<P> {
    pub fn new(provider: Arc<P>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn build_prompt(question: &str, passage: &str) -> String {
        format!("Question: {question}\n\nContext:\n{passage}\n\nVerdict JSON:")
    }

    async fn judge_passage(&self, question: &str, passage: &str) -> Result<bool, DomainError> {
        let request = LlmRequest::builder()
            .system(VERDICT_INSTRUCTIONS)
            .user(Self::build_prompt(question, passage))
            .temperature(0.0)
            .max_tokens(self.max_tokens)
            .build();

        let response = self.provider.chat(&self.model, request).await?;

        let content = response.content().ok_or_else(|| {
            DomainError::provider("context_precision", "Empty response from LLM")
        })?;

        parse_verdict(content)
    }
}

#[derive(Debug, Deserialize)]
struct VerdictResponse {
    #[serde(default)]
    reason: Option<String>,
    verdict: serde_json::Value,
}

/// Extract JSON object from a string (handles markdown code blocks)
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn parse_verdict(content: &str) -> Result<bool, DomainError> {
    let json_str = extract_json(content).unwrap_or(content);

    let parsed: VerdictResponse = serde_json::from_str(json_str).map_err(|e| {
        warn!("Failed to parse verdict response: {} - Response: {}", e, content);
        DomainError::provider(
            "context_precision",
            format!("Invalid verdict response format: {}", e),
        )
    })?;

    let verdict = match &parsed.verdict {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        serde_json::Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    };

    match verdict {
        Some(1) => Ok(true),
        Some(0) => Ok(false),
        _ => Err(DomainError::provider(
            "context_precision",
            format!("Verdict must be 0 or 1, got {}", parsed.verdict),
        )),
    }
    .inspect(|useful| {
        debug!(useful, reason = parsed.reason.as_deref().unwrap_or(""), "Passage judged");
    })
}

#[async_trait]
impl<P: LlmProvider + ?Sized> ContextPrecisionScorer for LlmContextPrecisionScorer<P> {
    async fn score(&self, question: &str, passages: &[String]) -> Result<f32, DomainError> {
        if passages.is_empty() {
            return Err(DomainError::validation("No passages to score"));
        }

        debug!(
            "Judging {} passages with model {}",
            passages.len(),
            self.model
        );

        let mut verdicts = Vec::with_capacity(passages.len());
        for passage in passages {
            verdicts.push(self.judge_passage(question, passage).await?);
        }

        Ok(average_precision(&verdicts))
    }

    fn scorer_name(&self) -> &'static str {
        "llm_context_precision"
    }
}
