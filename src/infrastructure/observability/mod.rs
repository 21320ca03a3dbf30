//! Observability infrastructure - Prometheus metrics

mod metrics;

pub use metrics::{
    create_metrics_router, init_metrics, record_emergency_scan, record_http_request,
    record_medication_warnings, record_relevance_verdict, record_scraper_document,
    record_web_fallback, PrometheusMetrics,
};
