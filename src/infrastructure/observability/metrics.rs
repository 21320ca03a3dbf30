//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::MetricsConfig;
use crate::domain::{EmergencyType, RelevanceVerdict};

const MAX_PATH_LABEL_LEN: usize = 50;

static UUID_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
        .expect("uuid pattern must compile")
});

static NUMERIC_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\d+(/|$)").expect("numeric pattern must compile"));

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the /metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Install the global Prometheus recorder.
///
/// Returns `None` when metrics are disabled or a recorder is already installed.
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("diabetes_crag_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
            tracing::info!("Prometheus metrics initialized at /metrics");

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request metric
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Count one scan, plus one hit per detected category
pub fn record_emergency_scan(emergency_types: &[EmergencyType]) {
    counter!("emergency_scans_total").increment(1);

    for emergency_type in emergency_types {
        counter!("emergencies_detected_total", "type" => emergency_type.as_str()).increment(1);
    }
}

pub fn record_medication_warnings(count: usize) {
    counter!("medication_checks_total").increment(1);

    if count > 0 {
        counter!("medication_warnings_total").increment(count as u64);
    }
}

pub fn record_relevance_verdict(verdict: &RelevanceVerdict, duration: Duration) {
    let outcome = if verdict.is_fail_open() {
        "fail_open"
    } else {
        "scored"
    };
    let labels = [
        ("verdict", verdict.chunk_relevance_score.as_str().to_string()),
        ("outcome", outcome.to_string()),
    ];

    counter!("relevance_verdicts_total", &labels).increment(1);
    histogram!("relevance_check_duration_seconds").record(duration.as_secs_f64());
}

pub fn record_web_fallback(success: bool) {
    let status = if success { "success" } else { "error" };
    counter!("web_fallbacks_total", "status" => status).increment(1);
}

/// Outcome is one of `stored_new`, `stored_updated`, `skipped`, `error`
pub fn record_scraper_document(outcome: &'static str) {
    counter!("scraper_documents_total", "outcome" => outcome).increment(1);
}

/// Sanitize URL path for metric labels (remove IDs, limit cardinality)
fn sanitize_path(path: &str) -> String {
    let path = UUID_SEGMENT.replace_all(path, "{id}");
    let path = NUMERIC_SEGMENT.replace_all(&path, "/{id}$1");

    path.chars().take(MAX_PATH_LABEL_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path_session_id() {
        let path = "/v1/sessions/550e8400-e29b-41d4-a716-446655440000/upload";
        assert_eq!(sanitize_path(path), "/v1/sessions/{id}/upload");
    }

    #[test]
    fn test_sanitize_path_numeric_id() {
        assert_eq!(sanitize_path("/v1/items/123/parts"), "/v1/items/{id}/parts");
    }

    #[test]
    fn test_sanitize_path_no_id() {
        assert_eq!(sanitize_path("/health"), "/health");
    }

    #[test]
    fn test_sanitize_path_truncates_long_paths() {
        let path = "/very/long/path/that/exceeds/the/maximum/allowed/length/for/metrics";
        assert_eq!(sanitize_path(path).len(), MAX_PATH_LABEL_LEN);
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_emergency_scan(&[EmergencyType::Cardiac]);
        record_medication_warnings(2);
        record_relevance_verdict(&RelevanceVerdict::from_value(0.9), Duration::from_millis(5));
        record_web_fallback(false);
        record_scraper_document("skipped");
    }
}
