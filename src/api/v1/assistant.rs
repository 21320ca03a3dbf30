//! Assistant endpoints - the full workflow and its system prompt

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, SystemPromptResponse};
use crate::domain::prompt::diabetes_system_prompt;
use crate::infrastructure::services::{AssistantContext, AssistantRequest};

/// POST /v1/assistant/context
pub async fn prepare_context(
    State(state): State<AppState>,
    Json(request): Json<AssistantRequest>,
) -> Result<Json<AssistantContext>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::empty_field("query"));
    }

    Ok(Json(state.assistant.prepare(&request).await))
}

/// GET /v1/assistant/system-prompt
pub async fn system_prompt() -> Json<SystemPromptResponse> {
    Json(SystemPromptResponse {
        prompt: diabetes_system_prompt().to_string(),
    })
}
