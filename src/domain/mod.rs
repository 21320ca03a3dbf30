//! Domain layer - Core types, traits and the deterministic screening logic

pub mod crag;
pub mod emergency;
pub mod error;
pub mod knowledge_base;
pub mod llm;
pub mod medication;
pub mod prompt;
pub mod scraper;
pub mod storage;
pub mod web_search;
pub mod workspace;

pub use crag::{ContextPrecisionScorer, RelevanceError, RelevanceLabel, RelevanceVerdict};
pub use emergency::{detect_emergency, EmergencyScanResult, EmergencyType};
pub use error::DomainError;
pub use knowledge_base::{KnowledgeBaseProvider, RetrievalParams, SearchResult};
pub use llm::{FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, Usage};
pub use medication::{check_medication_safety, MedicationSafetyResult};
pub use storage::{ObjectStore, StoredObject};
pub use web_search::{WebSearchProvider, WebSearchRequest, WebSearchResult};
pub use workspace::SessionWorkspace;
