//! Per-session scratch directories
//!
//! A workspace is created per request and handed explicitly to whatever needs
//! it, so concurrent sessions never share a path.

use std::path::{Component, Path, PathBuf};

use uuid::Uuid;

use crate::domain::DomainError;

/// Scratch directory owned by one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionWorkspace {
    session_id: String,
    root: PathBuf,
}

impl SessionWorkspace {
    /// Fresh random session identifier
    pub fn generate_session_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Create `{base_dir}/{session_id}` if missing
    pub async fn create(
        base_dir: impl AsRef<Path>,
        session_id: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let session_id = session_id.into();
        validate_session_id(&session_id)?;

        let root = base_dir.as_ref().join(&session_id);
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            DomainError::internal(format!(
                "Failed to create session workspace {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(Self { session_id, root })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether a path lies under the workspace root
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let escapes = path.components().any(|c| matches!(c, Component::ParentDir));
        !escapes && path.starts_with(&self.root)
    }

    /// Remove the workspace directory and everything in it
    pub async fn cleanup(&self) -> Result<(), DomainError> {
        match tokio::fs::remove_dir_all(&self.root).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::internal(format!(
                "Failed to remove session workspace {}: {}",
                self.root.display(),
                e
            ))),
        }
    }
}

fn validate_session_id(session_id: &str) -> Result<(), DomainError> {
    let valid = !session_id.is_empty()
        && session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "Invalid session id '{}'",
            session_id
        )))
    }
}
