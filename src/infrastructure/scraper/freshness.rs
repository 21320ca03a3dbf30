//! Page change detection over HTTP

use std::time::Duration;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::domain::scraper::{md5_hex, ContentFreshness};
use crate::domain::DomainError;
use crate::infrastructure::http::{HttpClient, HttpClientTrait};

const DEFAULT_HEAD_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

// First match wins, in this order.
static CONTENT_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        ".article-content",
        ".content-body",
        ".main-content",
        "article",
        ".article-body",
    ]
    .iter()
    .map(|s| Selector::parse(s).expect("content selector must parse"))
    .collect()
});

static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("body selector must parse"));

/// Main article text of a page, one text run per line.
///
/// Script and style text is ignored. Falls back to the whole body when no
/// article container matches or the container is empty.
pub fn extract_main_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let article_text = CONTENT_SELECTORS
        .iter()
        .find_map(|selector| document.select(selector).next())
        .map(element_text)
        .unwrap_or_default();

    if !article_text.is_empty() {
        return article_text;
    }

    document
        .select(&BODY_SELECTOR)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;

            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|e| matches!(e.name(), "script" | "style"))
            });
            if hidden {
                return None;
            }

            let trimmed = text.trim();
            (!trimmed.is_empty()).then_some(trimmed)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Checks whether a stored page changed upstream
#[derive(Debug)]
pub struct PageFreshnessChecker<C: HttpClientTrait = HttpClient> {
    client: C,
    head_timeout: Duration,
    fetch_timeout: Duration,
}

impl<C: HttpClientTrait> PageFreshnessChecker<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            head_timeout: DEFAULT_HEAD_TIMEOUT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_timeouts(mut self, head_timeout: Duration, fetch_timeout: Duration) -> Self {
        self.head_timeout = head_timeout;
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Compare the live page with a stored content hash.
    ///
    /// Never fails: errors are reported inside the result as a change.
    pub async fn check(&self, url: &str, existing_hash: Option<&str>) -> ContentFreshness {
        match self.try_check(url, existing_hash).await {
            Ok(freshness) => freshness,
            Err(e) => {
                debug!(url, error = %e, "Freshness check failed");
                ContentFreshness::failed(url, e.to_string())
            }
        }
    }

    async fn try_check(
        &self,
        url: &str,
        existing_hash: Option<&str>,
    ) -> Result<ContentFreshness, DomainError> {
        let head = self.client.head(url, self.head_timeout).await?;

        let Some(existing_hash) = existing_hash.filter(|h| !h.is_empty()) else {
            return Ok(ContentFreshness::unknown(url, head.last_modified));
        };

        let html = self.client.get_text(url, self.fetch_timeout).await?;
        let content = extract_main_text(&html);
        let current_hash = md5_hex(&content);

        Ok(ContentFreshness::compared(
            url,
            existing_hash,
            current_hash,
            head.last_modified,
            content.chars().count(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::{HeadResponse, MockHttpClient};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r#"<html><head><style>body { color: red; }</style></head>
<body>
  <nav>Menu</nav>
  <div class="article-content">
    <h1>Type 2 Diabetes</h1>
    <script>track("view");</script>
    <p>Insulin resistance is common.</p>
  </div>
</body></html>"#;

    const URL: &str = "https://www.webmd.com/diabetes/type-2";

    #[test]
    fn test_extract_article_container() {
        assert_eq!(
            extract_main_text(PAGE),
            "Type 2 Diabetes\nInsulin resistance is common."
        );
    }

    #[test]
    fn test_extract_selector_order() {
        let html = r#"<body><article>Article text</article><div class="main-content">Main</div></body>"#;
        assert_eq!(extract_main_text(html), "Main");
    }

    #[test]
    fn test_extract_falls_back_to_body() {
        let html = "<body><p>One</p><script>var x = 1;</script><p>Two</p></body>";
        assert_eq!(extract_main_text(html), "One\nTwo");
    }

    #[test]
    fn test_extract_empty_container_uses_body() {
        let html = r#"<body><div class="article-content">  </div><p>Body text</p></body>"#;
        assert_eq!(extract_main_text(html), "Body text");
    }

    #[tokio::test]
    async fn test_without_hash_only_heads() {
        let client = MockHttpClient::new().with_head(
            URL,
            HeadResponse {
                status: 200,
                last_modified: Some("Mon, 06 Oct 2025 10:00:00 GMT".to_string()),
            },
        );
        let checker = PageFreshnessChecker::new(client);

        let freshness = checker.check(URL, None).await;

        assert!(freshness.has_changed);
        assert!(freshness.current_hash.is_none());
        assert_eq!(
            freshness.last_modified.as_deref(),
            Some("Mon, 06 Oct 2025 10:00:00 GMT")
        );
        assert!(freshness.error.is_none());
    }

    #[tokio::test]
    async fn test_unchanged_page() {
        let stored = md5_hex("Type 2 Diabetes\nInsulin resistance is common.");
        let client = MockHttpClient::new().with_text(URL, PAGE);
        let checker = PageFreshnessChecker::new(client);

        let freshness = checker.check(URL, Some(&stored)).await;

        assert!(!freshness.has_changed);
        assert_eq!(freshness.current_hash.as_deref(), Some(stored.as_str()));
        assert_eq!(freshness.content_length, Some(45));
    }

    #[tokio::test]
    async fn test_changed_page() {
        let client = MockHttpClient::new().with_text(URL, PAGE);
        let checker = PageFreshnessChecker::new(client);

        let freshness = checker.check(URL, Some("0123abcd")).await;

        assert!(freshness.has_changed);
        assert!(freshness.current_hash.is_some());
    }

    #[tokio::test]
    async fn test_error_counts_as_changed() {
        let client = MockHttpClient::new().with_error(URL, "connection refused");
        let checker = PageFreshnessChecker::new(client);

        let freshness = checker.check(URL, Some("abc")).await;

        assert!(freshness.has_changed);
        assert!(freshness.error.unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_against_server() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/diabetes"))
            .respond_with(ResponseTemplate::new(200).insert_header("Last-Modified", "yesterday"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/diabetes"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let checker = PageFreshnessChecker::new(HttpClient::new());
        let url = format!("{}/diabetes", server.uri());

        let unknown = checker.check(&url, None).await;
        assert_eq!(unknown.last_modified.as_deref(), Some("yesterday"));

        let failed = checker.check(&url, Some("abc")).await;
        assert!(failed.has_changed);
        assert!(failed.error.unwrap().contains("404"));
    }
}
