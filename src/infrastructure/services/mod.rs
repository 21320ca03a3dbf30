//! Application services composing the domain and its adapters

mod assistant_service;
mod knowledge_service;
mod session_service;
mod upload_service;
mod web_search_service;

pub use assistant_service::{AssistantContext, AssistantRequest, AssistantService, WorkflowStep};
pub use knowledge_service::KnowledgeService;
pub use session_service::SessionService;
pub use upload_service::UploadService;
pub use web_search_service::MedicalWebSearchService;
