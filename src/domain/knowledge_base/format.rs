//! Rendering of retrieved passages for the agent

use super::entity::SearchResult;
use crate::domain::crag::{CONTENT_MARKER, SCORE_MARKER};

pub const KB_NOT_CONFIGURED_MESSAGE: &str =
    "Diabetes knowledge base is not configured. Please contact your administrator.";

pub const KB_NO_RESULTS_MESSAGE: &str = "No relevant diabetes information found for your question. Please try rephrasing or ask a different question.";

pub const KB_NO_RELEVANT_RESULTS_MESSAGE: &str =
    "No sufficiently relevant diabetes information found. Please try rephrasing your question.";

const RESULTS_HEADER: &str = "Based on medical knowledge sources:";
const UNKNOWN_SOURCE: &str = "Unknown source";

/// Text returned when retrieval fails
pub fn kb_error_message(error: impl std::fmt::Display) -> String {
    format!("Error accessing diabetes knowledge base: {error}")
}

/// Render passages scoring at least `min_score` as numbered source blocks.
///
/// Blocks keep the 1-based rank the knowledge base returned, so numbering can
/// skip when low scoring passages are dropped. The label and reference share
/// the score line so the content line holds only passage text.
pub fn format_retrieval_results(results: &[SearchResult], min_score: f32) -> String {
    if results.is_empty() {
        return KB_NO_RESULTS_MESSAGE.to_string();
    }

    let blocks: Vec<String> = results
        .iter()
        .enumerate()
        .filter(|(_, r)| r.score >= min_score)
        .map(|(idx, r)| format_block(idx + 1, r))
        .collect();

    if blocks.is_empty() {
        return KB_NO_RELEVANT_RESULTS_MESSAGE.to_string();
    }

    format!("{RESULTS_HEADER}\n\n{}", blocks.join("\n\n"))
}

fn format_block(rank: usize, result: &SearchResult) -> String {
    let uri = result.source.as_deref().unwrap_or(UNKNOWN_SOURCE);

    format!(
        "**Source {rank}** ({uri}) {SCORE_MARKER} {:.2}\n{CONTENT_MARKER} {}",
        result.score, result.content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::crag::extract_passages;

    fn result(content: &str, score: f32, source: Option<&str>) -> SearchResult {
        let r = SearchResult::new("id", content, score);
        match source {
            Some(s) => r.with_source(s),
            None => r,
        }
    }

    #[test]
    fn test_empty_results() {
        assert_eq!(format_retrieval_results(&[], 0.5), KB_NO_RESULTS_MESSAGE);
    }

    #[test]
    fn test_all_below_min_score() {
        let results = vec![result("a", 0.2, None), result("b", 0.49, None)];

        assert_eq!(
            format_retrieval_results(&results, 0.5),
            KB_NO_RELEVANT_RESULTS_MESSAGE
        );
    }

    #[test]
    fn test_block_format() {
        let results = vec![result("Metformin is first-line.", 0.876, Some("s3://kb/m.json"))];

        assert_eq!(
            format_retrieval_results(&results, 0.5),
            "Based on medical knowledge sources:\n\n\
             **Source 1** (s3://kb/m.json) Score: 0.88\nContent: Metformin is first-line."
        );
    }

    #[test]
    fn test_keeps_original_rank_and_unknown_source() {
        let results = vec![
            result("dropped", 0.3, None),
            result("kept", 0.7, None),
        ];

        let text = format_retrieval_results(&results, 0.5);

        assert!(!text.contains("dropped"));
        assert!(text.contains("**Source 2** (Unknown source) Score: 0.70"));
    }

    #[test]
    fn test_min_score_is_inclusive() {
        let results = vec![result("edge", 0.5, None)];

        assert!(format_retrieval_results(&results, 0.5).contains("edge"));
    }

    #[test]
    fn test_formatted_output_is_extractable() {
        let results = vec![
            result("First passage.", 0.9, Some("s3://a")),
            result("Second passage.", 0.8, Some("s3://b")),
        ];

        let passages = extract_passages(&format_retrieval_results(&results, 0.5)).unwrap();

        assert_eq!(
            passages,
            vec!["First passage.".to_string(), "Second passage.".to_string()]
        );
    }

    #[test]
    fn test_kb_error_message() {
        assert_eq!(
            kb_error_message("AccessDenied"),
            "Error accessing diabetes knowledge base: AccessDenied"
        );
    }
}
