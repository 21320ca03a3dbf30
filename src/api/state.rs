//! Shared application state for handlers

use std::sync::Arc;

use crate::infrastructure::services::{AssistantService, SessionService, UploadService};

#[derive(Debug, Clone)]
pub struct AppState {
    pub assistant: Arc<AssistantService>,
    pub uploads: Arc<UploadService>,
    pub sessions: Arc<SessionService>,
}

impl AppState {
    pub fn new(
        assistant: Arc<AssistantService>,
        uploads: Arc<UploadService>,
        sessions: Arc<SessionService>,
    ) -> Self {
        Self {
            assistant,
            uploads,
            sessions,
        }
    }
}
