//! Amazon S3 object store

use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use tracing::debug;

use crate::domain::storage::{ObjectStore, StoredObject};
use crate::domain::DomainError;

/// Object store backed by one S3 bucket
pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
    region: String,
}

impl Debug for S3ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ObjectStore")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .finish()
    }
}

impl S3ObjectStore {
    pub fn new(
        aws_config: &aws_config::SdkConfig,
        bucket: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            client: S3Client::new(aws_config),
            bucket: bucket.into(),
            region: region.into(),
        }
    }
}

/// Virtual-hosted style URL of an object
pub(crate) fn s3_object_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key)
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(e) => {
                let missing = e
                    .as_service_error()
                    .map(|se| se.is_no_such_key())
                    .unwrap_or(false);

                if missing {
                    debug!(bucket = %self.bucket, key, "Object not found");
                    return Ok(None);
                }

                return Err(DomainError::storage(format!(
                    "Failed to read s3://{}/{}: {}",
                    self.bucket, key, e
                )));
            }
        };

        let data = output.body.collect().await.map_err(|e| {
            DomainError::storage(format!("Failed to read body of s3://{}/{}: {}", self.bucket, key, e))
        })?;

        Ok(Some(data.into_bytes().to_vec()))
    }

    async fn put_object(&self, object: StoredObject) -> Result<(), DomainError> {
        let key = object.key;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(object.content_type)
            .set_metadata((!object.metadata.is_empty()).then_some(object.metadata))
            .body(ByteStream::from(object.body))
            .send()
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to write s3://{}/{}: {}", self.bucket, key, e))
            })?;

        debug!(bucket = %self.bucket, key = %key, "Object written");
        Ok(())
    }

    fn object_url(&self, key: &str) -> String {
        s3_object_url(&self.bucket, &self.region, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url() {
        assert_eq!(
            s3_object_url("uploads", "us-east-1", "20251017/abc_report.pdf"),
            "https://uploads.s3.us-east-1.amazonaws.com/20251017/abc_report.pdf"
        );
    }
}
