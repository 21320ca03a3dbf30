//! Tool endpoints - one per assistant tool

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, Json, MedicationRequest, QueryRequest, QuestionRequest, RelevanceRequest,
    ToolTextResponse,
};
use crate::domain::{EmergencyScanResult, MedicationSafetyResult, RelevanceVerdict};

fn require_text(value: &str, param: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::empty_field(param));
    }
    Ok(())
}

/// POST /v1/tools/detect_emergency
///
/// Empty text is a valid scan with no findings.
pub async fn detect_emergency(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Json<EmergencyScanResult> {
    Json(state.assistant.detect_emergency(&request.query))
}

/// POST /v1/tools/query_diabetes_knowledge
pub async fn query_diabetes_knowledge(
    State(state): State<AppState>,
    Json(request): Json<QuestionRequest>,
) -> Result<Json<ToolTextResponse>, ApiError> {
    require_text(&request.question, "question")?;

    let result = state.assistant.knowledge().query(&request.question).await;
    Ok(Json(ToolTextResponse { result }))
}

/// POST /v1/tools/check_chunks_relevance
///
/// Never rejects: invalid input yields the fail-open verdict.
pub async fn check_chunks_relevance(
    State(state): State<AppState>,
    Json(request): Json<RelevanceRequest>,
) -> Json<RelevanceVerdict> {
    let verdict = state
        .assistant
        .relevance()
        .check(&request.results, &request.question)
        .await;

    Json(verdict)
}

/// POST /v1/tools/medical_web_search
pub async fn medical_web_search(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<ToolTextResponse>, ApiError> {
    require_text(&request.query, "query")?;

    let result = state.assistant.web_search().search(&request.query).await;
    Ok(Json(ToolTextResponse { result }))
}

/// POST /v1/tools/check_medication_safety
pub async fn check_medication_safety(
    State(state): State<AppState>,
    Json(request): Json<MedicationRequest>,
) -> Json<MedicationSafetyResult> {
    Json(
        state
            .assistant
            .check_medications(&request.medications, &request.query),
    )
}
