//! Request and response bodies of the tool and assistant endpoints

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRequest {
    #[serde(default)]
    pub question: String,
}

/// Missing fields reach the checker as empty strings and fail open
#[derive(Debug, Clone, Deserialize)]
pub struct RelevanceRequest {
    #[serde(default)]
    pub results: String,
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MedicationRequest {
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub query: String,
}

/// Text produced by a retrieval tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolTextResponse {
    pub result: String,
}

/// Which optional integrations are configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterResponse {
    pub web_search: bool,
    pub knowledge_base: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemPromptResponse {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreatedResponse {
    pub session_id: String,
    pub workspace_dir: String,
    pub system_prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadRequest {
    pub filepath: String,
    #[serde(default)]
    pub user_sub: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}
