//! Page change detection result

use serde::{Deserialize, Serialize};

/// Whether a page changed since it was last stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFreshness {
    pub url: String,
    pub has_changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContentFreshness {
    /// Without a stored hash the page is treated as changed
    pub fn unknown(url: impl Into<String>, last_modified: Option<String>) -> Self {
        Self {
            url: url.into(),
            has_changed: true,
            current_hash: None,
            last_modified,
            content_length: None,
            error: None,
        }
    }

    /// Compare a freshly computed hash with the stored one
    pub fn compared(
        url: impl Into<String>,
        existing_hash: &str,
        current_hash: String,
        last_modified: Option<String>,
        content_length: usize,
    ) -> Self {
        Self {
            url: url.into(),
            has_changed: current_hash != existing_hash,
            current_hash: Some(current_hash),
            last_modified,
            content_length: Some(content_length),
            error: None,
        }
    }

    /// Any failure counts as a change
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            has_changed: true,
            current_hash: None,
            last_modified: None,
            content_length: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compared() {
        let same = ContentFreshness::compared("u", "abc", "abc".to_string(), None, 10);
        assert!(!same.has_changed);

        let changed = ContentFreshness::compared("u", "abc", "def".to_string(), None, 10);
        assert!(changed.has_changed);
        assert_eq!(changed.content_length, Some(10));
    }

    #[test]
    fn test_failed_counts_as_change() {
        let result = ContentFreshness::failed("u", "timeout");

        assert!(result.has_changed);
        assert_eq!(result.error.as_deref(), Some("timeout"));
    }
}
