//! Session endpoints - scratch workspaces and file upload

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, SessionCreatedResponse, UploadRequest, UploadResponse};
use crate::domain::prompt::session_system_prompt;

/// POST /v1/sessions
pub async fn create_session(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let workspace = state.sessions.create().await?;

    let response = SessionCreatedResponse {
        session_id: workspace.session_id().to_string(),
        workspace_dir: workspace.root().display().to_string(),
        system_prompt: session_system_prompt(&workspace),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /v1/sessions/{session_id}/upload
pub async fn upload_file(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<UploadRequest>,
) -> Result<Json<UploadResponse>, ApiError> {
    if request.filepath.trim().is_empty() {
        return Err(ApiError::empty_field("filepath"));
    }

    let workspace = state.sessions.get(&session_id).await?;
    let url = state
        .uploads
        .upload(&workspace, &request.filepath, request.user_sub.as_deref())
        .await?;

    Ok(Json(UploadResponse { url }))
}

/// DELETE /v1/sessions/{session_id}
pub async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.sessions.close(&session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
