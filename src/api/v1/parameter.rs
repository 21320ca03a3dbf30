use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{Json, ParameterResponse};

/// GET /v1/parameter - which integrations the UI can offer
pub async fn get_parameters(State(state): State<AppState>) -> Json<ParameterResponse> {
    Json(ParameterResponse {
        web_search: state.assistant.web_search().is_configured(),
        knowledge_base: state.assistant.knowledge().is_configured(),
    })
}
