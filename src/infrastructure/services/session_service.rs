//! Session service - tracks the live session workspaces

use std::collections::HashMap;
use std::path::PathBuf;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::{DomainError, SessionWorkspace};

/// Registry of open session workspaces under one base directory
#[derive(Debug)]
pub struct SessionService {
    base_dir: PathBuf,
    sessions: RwLock<HashMap<String, SessionWorkspace>>,
}

impl SessionService {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn base_dir(&self) -> &std::path::Path {
        &self.base_dir
    }

    /// Open a workspace under a fresh session id
    pub async fn create(&self) -> Result<SessionWorkspace, DomainError> {
        let session_id = SessionWorkspace::generate_session_id();
        let workspace = SessionWorkspace::create(&self.base_dir, session_id).await?;

        self.sessions
            .write()
            .await
            .insert(workspace.session_id().to_string(), workspace.clone());

        info!(session_id = workspace.session_id(), "Session workspace created");
        Ok(workspace)
    }

    pub async fn get(&self, session_id: &str) -> Result<SessionWorkspace, DomainError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("Session '{}' not found", session_id)))
    }

    /// Forget the session and delete its directory
    pub async fn close(&self, session_id: &str) -> Result<(), DomainError> {
        let workspace = self
            .sessions
            .write()
            .await
            .remove(session_id)
            .ok_or_else(|| DomainError::not_found(format!("Session '{}' not found", session_id)))?;

        workspace.cleanup().await?;
        debug!(session_id, "Session workspace removed");
        Ok(())
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_get_close() {
        let dir = tempfile::tempdir().unwrap();
        let service = SessionService::new(dir.path());

        let workspace = service.create().await.unwrap();
        assert!(workspace.root().is_dir());
        assert!(workspace.root().starts_with(dir.path()));

        let found = service.get(workspace.session_id()).await.unwrap();
        assert_eq!(found, workspace);
        assert_eq!(service.count().await, 1);

        service.close(workspace.session_id()).await.unwrap();
        assert!(!workspace.root().exists());
        assert!(service.get(workspace.session_id()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let service = SessionService::new(dir.path());

        let a = service.create().await.unwrap();
        let b = service.create().await.unwrap();

        assert_ne!(a.session_id(), b.session_id());
        assert!(!a.contains(b.root().join("file.txt")));
    }

    #[tokio::test]
    async fn test_close_unknown_session() {
        let dir = tempfile::tempdir().unwrap();
        let service = SessionService::new(dir.path());

        assert!(service.close("missing").await.unwrap_err().is_not_found());
    }
}
