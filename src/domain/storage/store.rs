//! Object store trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::object::StoredObject;
use crate::domain::DomainError;

/// Flat key/value object storage backed by a single bucket
#[async_trait]
pub trait ObjectStore: Send + Sync + Debug {
    /// Bucket the store writes to
    fn bucket(&self) -> &str;

    /// Read an object body, `None` when the key does not exist
    async fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError>;

    /// Write an object, replacing any existing one at the same key
    async fn put_object(&self, object: StoredObject) -> Result<(), DomainError>;

    /// Public URL of an object
    fn object_url(&self, key: &str) -> String;
}
