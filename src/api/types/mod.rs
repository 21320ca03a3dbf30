//! API request, response and error types

pub mod error;
pub mod json;
pub mod tools;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use tools::{
    MedicationRequest, ParameterResponse, QueryRequest, QuestionRequest, RelevanceRequest,
    SessionCreatedResponse, SystemPromptResponse, ToolTextResponse, UploadRequest, UploadResponse,
};
