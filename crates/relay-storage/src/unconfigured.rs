//! Placeholder backend for a relay started without usable storage settings.

use crate::traits::{ObjectAcl, ObjectReader, Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;

/// Storage that fails every put with the reason it could not be built.
///
/// Installed by the factory so missing credentials or bucket names surface
/// as per-request storage errors instead of a startup failure.
#[derive(Clone, Debug)]
pub struct UnconfiguredStorage {
    backend: StorageBackend,
    reason: String,
}

impl UnconfiguredStorage {
    pub fn new(backend: StorageBackend, reason: impl Into<String>) -> Self {
        Self {
            backend,
            reason: reason.into(),
        }
    }

    fn error(&self, key: &str) -> StorageError {
        tracing::error!(
            backend = %self.backend,
            key = %key,
            reason = %self.reason,
            "Storage backend is not configured"
        );
        StorageError::ConfigError(self.reason.clone())
    }
}

#[async_trait]
impl Storage for UnconfiguredStorage {
    async fn put(
        &self,
        key: &str,
        _data: Bytes,
        _content_type: &str,
        _acl: ObjectAcl,
    ) -> StorageResult<String> {
        Err(self.error(key))
    }

    async fn put_stream(
        &self,
        key: &str,
        _reader: ObjectReader,
        _content_length: Option<u64>,
        _content_type: &str,
        _acl: ObjectAcl,
    ) -> StorageResult<String> {
        Err(self.error(key))
    }

    fn backend_type(&self) -> StorageBackend {
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_put_fails_with_reason() {
        let storage = UnconfiguredStorage::new(StorageBackend::S3, "AWS_BUCKET_NAME not configured");

        let err = storage
            .put("a.png", Bytes::new(), "image/png", ObjectAcl::PublicRead)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("AWS_BUCKET_NAME"));

        let reader: ObjectReader = Box::pin(std::io::Cursor::new(Vec::new()));
        let err = storage
            .put_stream("a.bin", reader, None, "application/octet-stream", ObjectAcl::PublicRead)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::ConfigError(_)));
        assert_eq!(storage.backend_type(), StorageBackend::S3);
    }
}
