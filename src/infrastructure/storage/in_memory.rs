//! In-memory object store

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{ObjectStore, StoredObject};
use crate::domain::DomainError;

/// Thread-safe in-memory object store
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    bucket: String,
    objects: RwLock<HashMap<String, StoredObject>>,
    puts: AtomicUsize,
    failing_prefix: Option<String>,
}

impl InMemoryObjectStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Default::default()
        }
    }

    /// Pre-populate a raw object body
    pub fn with_object(self, key: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        let key = key.into();
        if let Ok(mut objects) = self.objects.write() {
            objects.insert(key.clone(), StoredObject::new(key, body));
        }
        self
    }

    /// Writes to keys starting with `prefix` fail
    pub fn with_failing_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.failing_prefix = Some(prefix.into());
        self
    }

    /// Number of successful writes
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().ok()?.get(key).cloned()
    }

    /// All keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .objects
            .read()
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        let objects = self
            .objects
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(objects.get(key).map(|o| o.body.clone()))
    }

    async fn put_object(&self, object: StoredObject) -> Result<(), DomainError> {
        if let Some(prefix) = &self.failing_prefix {
            if object.key.starts_with(prefix.as_str()) {
                return Err(DomainError::storage(format!(
                    "Write rejected for '{}'",
                    object.key
                )));
            }
        }

        let mut objects = self
            .objects
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        objects.insert(object.key.clone(), object);
        self.puts.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }

    fn object_url(&self, key: &str) -> String {
        format!("memory://{}/{}", self.bucket, key)
    }
}
