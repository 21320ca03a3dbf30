//! Passage extraction from formatted retrieval output
//!
//! The knowledge retriever renders each passage as a block carrying a
//! [`SCORE_MARKER`] line followed by a [`CONTENT_MARKER`] line. Extraction
//! walks those markers; both sides import the constants from here.

use thiserror::Error;

/// Marks the start of a passage block
pub const SCORE_MARKER: &str = "Score:";

/// Precedes the passage text, always at the start of a line
pub const CONTENT_MARKER: &str = "Content:";

/// Failures of the relevance check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelevanceError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Scoring failed: {0}")]
    Scoring(String),
}

impl RelevanceError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn scoring(message: impl Into<String>) -> Self {
        Self::Scoring(message.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Reject empty inputs before any extraction or scoring happens
pub fn validate_relevance_input(results: &str, question: &str) -> Result<(), RelevanceError> {
    if results.trim().is_empty() {
        return Err(RelevanceError::invalid_input(
            "'results' must be a non-empty string",
        ));
    }

    if question.trim().is_empty() {
        return Err(RelevanceError::invalid_input(
            "'question' must be a non-empty string",
        ));
    }

    Ok(())
}

/// Pull the passage texts out of retrieval output.
///
/// Each passage runs from the whitespace after `\nContent:` up to the line
/// holding the next `Score:` marker, or the end of input, and is trimmed.
/// Whatever precedes the next marker on its line is a block label and is
/// left out. Blocks without a content line are skipped, as are passages
/// that trim to nothing.
pub fn extract_passages(results: &str) -> Result<Vec<String>, RelevanceError> {
    let content_line = format!("\n{CONTENT_MARKER}");

    let passages: Vec<String> = split_at_markers(results)
        .filter_map(|(block, is_last)| {
            let start = block.find(&content_line)? + content_line.len();
            let mut passage = &block[start..];
            if !is_last {
                if let Some(label_start) = passage.rfind('\n') {
                    passage = &passage[..label_start];
                }
            }
            let passage = passage.trim();
            (!passage.is_empty()).then(|| passage.to_string())
        })
        .collect();

    if passages.is_empty() {
        return Err(RelevanceError::invalid_input(
            "No valid content chunks found in 'results'",
        ));
    }

    Ok(passages)
}

/// Whether the text carries score markers at all
pub fn has_score_markers(results: &str) -> bool {
    results.contains(SCORE_MARKER)
}

// Slices starting right after each Score: marker and ending at the next one,
// flagged when no marker follows.
fn split_at_markers(results: &str) -> impl Iterator<Item = (&str, bool)> {
    let starts: Vec<usize> = results
        .match_indices(SCORE_MARKER)
        .map(|(idx, _)| idx)
        .collect();

    let mut blocks = Vec::with_capacity(starts.len());
    for (i, start) in starts.iter().enumerate() {
        let next = starts.get(i + 1).copied();
        let end = next.unwrap_or(results.len());
        blocks.push((&results[start + SCORE_MARKER.len()..end], next.is_none()));
    }

    blocks.into_iter()
}
