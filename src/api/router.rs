use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::{logging_middleware, metrics_middleware};
use super::state::AppState;
use super::v1;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Build the HTTP application; `/metrics` is mounted only when a recorder is installed
pub fn create_router(state: AppState, metrics: Option<PrometheusMetrics>) -> Router {
    let router = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/v1", v1::create_v1_router())
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http());

    match metrics {
        Some(metrics) => router.merge(create_metrics_router(metrics)),
        None => router,
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::crag::MockContextPrecisionScorer;
    use crate::domain::knowledge_base::{MockKnowledgeBaseProvider, SearchResult};
    use crate::infrastructure::crag::RelevanceChecker;
    use crate::infrastructure::services::{
        AssistantService, KnowledgeService, MedicalWebSearchService, SessionService, UploadService,
    };
    use crate::infrastructure::storage::InMemoryObjectStore;

    fn test_state(base_dir: &Path, store: Arc<InMemoryObjectStore>) -> AppState {
        let kb = MockKnowledgeBaseProvider::new().with_results(vec![SearchResult::new(
            "1",
            "A1C reflects average blood sugar over three months.",
            0.9,
        )]);

        let assistant = AssistantService::new(
            Arc::new(KnowledgeService::new(Some(Arc::new(kb)))),
            Arc::new(RelevanceChecker::new(Arc::new(
                MockContextPrecisionScorer::new().with_value(0.75),
            ))),
            Arc::new(MedicalWebSearchService::new(None)),
        );

        AppState::new(
            Arc::new(assistant),
            Arc::new(UploadService::new(Some(store))),
            Arc::new(SessionService::new(base_dir)),
        )
    }

    fn app(base_dir: &Path) -> Router {
        create_router(
            test_state(base_dir, Arc::new(InMemoryObjectStore::new("uploads"))),
            None,
        )
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());

        let response = app.clone().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.clone().oneshot(get("/live")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get("/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "degraded");
    }

    #[tokio::test]
    async fn test_parameter_flags() {
        let dir = tempfile::tempdir().unwrap();

        let response = app(dir.path()).oneshot(get("/v1/parameter")).await.unwrap();
        let body = body_json(response).await;

        assert_eq!(body, json!({"webSearch": false, "knowledgeBase": true}));
    }

    #[tokio::test]
    async fn test_detect_emergency_endpoint() {
        let dir = tempfile::tempdir().unwrap();

        let response = app(dir.path())
            .oneshot(post(
                "/v1/tools/detect_emergency",
                json!({"query": "I have fruity breath and feel awful"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["is_emergency"], true);
        assert!(body["emergency_response"].as_str().unwrap().contains("911"));
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());

        for (uri, body) in [
            ("/v1/tools/query_diabetes_knowledge", json!({"question": ""})),
            ("/v1/tools/medical_web_search", json!({})),
            ("/v1/assistant/context", json!({"query": ""})),
        ] {
            let response = app.clone().oneshot(post(uri, body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);

            let body = body_json(response).await;
            assert_eq!(body["error"]["type"], "invalid_request_error");
        }
    }

    #[tokio::test]
    async fn test_scanners_accept_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());

        let response = app
            .clone()
            .oneshot(post("/v1/tools/detect_emergency", json!({"query": ""})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["is_emergency"], false);
        assert_eq!(body["emergency_types"], json!([]));

        let response = app
            .oneshot(post(
                "/v1/tools/check_medication_safety",
                json!({"medications": [], "query": ""}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["has_concerns"], false);
        assert_eq!(body["safety_warnings"], json!([]));
    }

    #[tokio::test]
    async fn test_relevance_endpoint_fails_open_on_bad_input() {
        let dir = tempfile::tempdir().unwrap();

        let response = app(dir.path())
            .oneshot(post("/v1/tools/check_chunks_relevance", json!({"question": "What is A1C?"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["chunk_relevance_score"], "yes");
        assert_eq!(body["chunk_relevance_value"], 0.5);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_relevance_endpoint_scores_passages() {
        let dir = tempfile::tempdir().unwrap();
        let results = "Result 1 (Score: 0.9):\nContent: A1C reflects average blood sugar.\n";

        let response = app(dir.path())
            .oneshot(post(
                "/v1/tools/check_chunks_relevance",
                json!({"results": results, "question": "What is A1C?"}),
            ))
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["chunk_relevance_score"], "yes");
        assert_eq!(body["chunk_relevance_value"], 0.75);
    }

    #[tokio::test]
    async fn test_knowledge_and_web_tools() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());

        let response = app
            .clone()
            .oneshot(post(
                "/v1/tools/query_diabetes_knowledge",
                json!({"question": "What is A1C?"}),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert!(body["result"].as_str().unwrap().contains("three months"));

        let response = app
            .oneshot(post("/v1/tools/medical_web_search", json!({"query": "A1C"})))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert!(body["result"].as_str().unwrap().contains("not available"));
    }

    #[tokio::test]
    async fn test_medication_endpoint() {
        let dir = tempfile::tempdir().unwrap();

        let response = app(dir.path())
            .oneshot(post(
                "/v1/tools/check_medication_safety",
                json!({"medications": ["Glipizide"], "query": "Can I take ibuprofen?"}),
            ))
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["has_concerns"], true);
        assert!(body["safety_warnings"][0]
            .as_str()
            .unwrap()
            .contains("Glipizide may interact with ibuprofen"));
    }

    #[tokio::test]
    async fn test_assistant_context_and_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());

        let response = app
            .clone()
            .oneshot(post("/v1/assistant/context", json!({"query": "What is A1C?"})))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(
            body["steps"],
            json!(["detect_emergency", "query_diabetes_knowledge", "check_chunks_relevance"])
        );

        let response = app.oneshot(get("/v1/assistant/system-prompt")).await.unwrap();
        let body = body_json(response).await;
        assert!(body["prompt"].as_str().unwrap().contains("check_chunks_relevance"));
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let dir = tempfile::tempdir().unwrap();

        let request = Request::builder()
            .method("POST")
            .uri("/v1/tools/detect_emergency")
            .header("content-type", "application/json")
            .body(Body::from("{broken"))
            .unwrap();

        let response = app(dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(InMemoryObjectStore::new("uploads"));
        let app = create_router(test_state(dir.path(), store.clone()), None);

        let response = app.clone().oneshot(post("/v1/sessions", json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let session = body_json(response).await;
        let session_id = session["session_id"].as_str().unwrap().to_string();
        let workspace_dir = session["workspace_dir"].as_str().unwrap().to_string();
        assert!(session["system_prompt"].as_str().unwrap().contains(&workspace_dir));

        let file = format!("{}/plot.png", workspace_dir);
        tokio::fs::write(&file, b"png").await.unwrap();

        let response = app
            .clone()
            .oneshot(post(
                &format!("/v1/sessions/{}/upload", session_id),
                json!({"filepath": file, "user_sub": "user-1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["url"].as_str().unwrap().starts_with("memory://uploads/"));
        assert_eq!(store.put_count(), 1);

        let response = app
            .clone()
            .oneshot(post(
                &format!("/v1/sessions/{}/upload", session_id),
                json!({"filepath": "/etc/hosts"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let delete = Request::builder()
            .method("DELETE")
            .uri(format!("/v1/sessions/{}", session_id))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(delete).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(!Path::new(&workspace_dir).exists());

        let response = app
            .oneshot(post(
                &format!("/v1/sessions/{}/upload", session_id),
                json!({"filepath": file}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
