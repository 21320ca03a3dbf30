//! Medical web fallback request and rendering

use super::provider::{WebSearchRequest, WebSearchResult};

pub const WEB_SEARCH_NOT_CONFIGURED_MESSAGE: &str =
    "Medical web search functionality is not available because there is no API Key.";

/// Authoritative medical sites the fallback search targets
pub const MEDICAL_DOMAINS: [&str; 6] = [
    "diabetes.org",
    "cdc.gov",
    "nih.gov",
    "mayoclinic.org",
    "webmd.com",
    "pubmed.ncbi.nlm.nih.gov",
];

pub const MEDICAL_MAX_RESULTS: u32 = 3;

const DEFAULT_SCORE: f32 = 0.5;

/// Text returned when the search call fails
pub fn web_search_error_message(error: impl std::fmt::Display) -> String {
    format!("Error performing medical web search: {error}")
}

/// Request used by the relevance fallback
pub fn medical_search_request(query: impl Into<String>) -> WebSearchRequest {
    WebSearchRequest::new(query)
        .with_max_results(MEDICAL_MAX_RESULTS)
        .with_include_domains(MEDICAL_DOMAINS)
}

/// Render up to [`MEDICAL_MAX_RESULTS`] search hits as numbered source blocks
pub fn format_web_results(results: &[WebSearchResult]) -> String {
    let blocks: Vec<String> = results
        .iter()
        .take(MEDICAL_MAX_RESULTS as usize)
        .enumerate()
        .map(|(idx, r)| {
            format!(
                "**Source {}** (relevance: {:.2})\n**Title:** {}\n{}\n\n*Reference: {}*",
                idx + 1,
                r.score.unwrap_or(DEFAULT_SCORE),
                r.title.as_deref().unwrap_or("Unknown Title"),
                r.content,
                r.url.as_deref().unwrap_or("Unknown URL"),
            )
        })
        .collect();

    if blocks.is_empty() {
        return "**Web Search Results:**".to_string();
    }

    format!("**Web Search Results:**\n\n{}", blocks.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medical_request() {
        let request = medical_search_request("gestational diabetes screening");

        assert_eq!(request.query, "gestational diabetes screening");
        assert_eq!(request.max_results, 3);
        assert_eq!(request.include_domains.len(), 6);
        assert!(request.include_domains.contains(&"pubmed.ncbi.nlm.nih.gov".to_string()));
        assert!(!request.include_raw_content);
    }

    #[test]
    fn test_format_results() {
        let results = vec![
            WebSearchResult::new("https://www.cdc.gov/diabetes", "CDC overview.")
                .with_title("Diabetes Basics")
                .with_score(0.912),
        ];

        assert_eq!(
            format_web_results(&results),
            "**Web Search Results:**\n\n**Source 1** (relevance: 0.91)\n**Title:** Diabetes Basics\nCDC overview.\n\n*Reference: https://www.cdc.gov/diabetes*"
        );
    }

    #[test]
    fn test_format_defaults() {
        let results = vec![WebSearchResult {
            content: "Some text".to_string(),
            ..Default::default()
        }];

        let text = format_web_results(&results);

        assert!(text.contains("(relevance: 0.50)"));
        assert!(text.contains("**Title:** Unknown Title"));
        assert!(text.contains("*Reference: Unknown URL*"));
    }

    #[test]
    fn test_format_caps_results() {
        let results: Vec<WebSearchResult> = (1..=5)
            .map(|i| WebSearchResult::new(format!("https://www.cdc.gov/{i}"), format!("hit {i}")))
            .collect();

        let text = format_web_results(&results);

        assert!(text.contains("**Source 3**"));
        assert!(!text.contains("**Source 4**"));
        assert!(!text.contains("hit 5"));
    }

    #[test]
    fn test_format_no_results() {
        assert_eq!(format_web_results(&[]), "**Web Search Results:**");
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            web_search_error_message("HTTP 500"),
            "Error performing medical web search: HTTP 500"
        );
    }
}
