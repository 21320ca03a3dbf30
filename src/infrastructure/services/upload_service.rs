//! Upload service - publishes files written inside a session workspace

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::storage::{ObjectStore, StoredObject};
use crate::domain::{DomainError, SessionWorkspace};

/// Copies workspace files to the upload bucket and returns their URL
#[derive(Debug, Clone)]
pub struct UploadService {
    store: Option<Arc<dyn ObjectStore>>,
}

impl UploadService {
    /// A `None` store means uploads are not configured
    pub fn new(store: Option<Arc<dyn ObjectStore>>) -> Self {
        Self { store }
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    pub async fn upload(
        &self,
        workspace: &SessionWorkspace,
        filepath: &str,
        user_sub: Option<&str>,
    ) -> Result<String, DomainError> {
        if !workspace.contains(filepath) {
            return Err(DomainError::validation(format!(
                "{} does not appear to be a file under the session workspace directory {}. \
                 Files to be uploaded must exist under the session workspace.",
                filepath,
                workspace.root().display()
            )));
        }

        let store = self
            .store
            .as_ref()
            .ok_or_else(|| DomainError::configuration("File upload storage is not configured"))?;

        let path = Path::new(filepath);
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DomainError::validation(format!("{} is not a file path", filepath)))?;

        let body = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DomainError::not_found(format!("File '{}' not found", filepath))
            } else {
                DomainError::internal(format!("Failed to read {}: {}", filepath, e))
            }
        })?;

        let key = format!(
            "{}/{}_{}",
            Utc::now().format("%Y%m%d"),
            Uuid::new_v4(),
            filename
        );

        let mut object = StoredObject::new(key.clone(), body)
            .with_content_type(content_type_for(filename))
            .with_metadata("session-id", workspace.session_id());

        if let Some(user_sub) = user_sub.filter(|s| !s.is_empty()) {
            object = object.with_metadata("user-sub", user_sub);
        }

        store.put_object(object).await?;

        let url = store.object_url(&key);
        info!(session_id = workspace.session_id(), key = %key, "File uploaded");

        Ok(url)
    }
}

fn content_type_for(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
