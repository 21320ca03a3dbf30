//! v1 API endpoints

pub mod assistant;
pub mod parameter;
pub mod sessions;
pub mod tools;

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::state::AppState;

pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/parameter", get(parameter::get_parameters))
        .route("/tools/detect_emergency", post(tools::detect_emergency))
        .route(
            "/tools/query_diabetes_knowledge",
            post(tools::query_diabetes_knowledge),
        )
        .route(
            "/tools/check_chunks_relevance",
            post(tools::check_chunks_relevance),
        )
        .route("/tools/medical_web_search", post(tools::medical_web_search))
        .route(
            "/tools/check_medication_safety",
            post(tools::check_medication_safety),
        )
        .route("/assistant/context", post(assistant::prepare_context))
        .route("/assistant/system-prompt", get(assistant::system_prompt))
        .route("/sessions", post(sessions::create_session))
        .route("/sessions/{session_id}/upload", post(sessions::upload_file))
        .route("/sessions/{session_id}", delete(sessions::close_session))
}
