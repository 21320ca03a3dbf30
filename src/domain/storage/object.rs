//! Stored object types

use std::collections::HashMap;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// An object written to the bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: String,
    /// User metadata attached to the object
    pub metadata: HashMap<String, String>,
}

impl StoredObject {
    pub fn new(key: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            body: body.into(),
            content_type: "application/octet-stream".to_string(),
            metadata: HashMap::new(),
        }
    }

    /// JSON body with the JSON content type
    pub fn json(key: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::new(key, body).with_content_type(JSON_CONTENT_TYPE)
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_object() {
        let object = StoredObject::json("diabetes-scraper/tracker.json", b"{}".to_vec())
            .with_metadata("content-hash", "abc");

        assert_eq!(object.content_type, "application/json");
        assert_eq!(object.metadata["content-hash"], "abc");
        assert_eq!(object.body, b"{}");
    }
}
