//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Reader handed to [`Storage::put_stream`].
pub type ObjectReader = Pin<Box<dyn AsyncRead + Send + Unpin>>;

/// Visibility of a stored object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectAcl {
    #[default]
    PublicRead,
}

/// Storage abstraction trait
///
/// The bucket (or base directory) is fixed when the backend is built, so a
/// put only names the key. Both methods return the object's public URL.
/// Implementations never retry.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store an in-memory payload under `key`
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
        acl: ObjectAcl,
    ) -> StorageResult<String>;

    /// Store the contents of `reader` under `key`
    ///
    /// The reader is consumed until EOF. Backends should not buffer the
    /// whole payload in memory.
    ///
    /// # Arguments
    /// * `key` - Storage key for the object
    /// * `reader` - Async reader that provides the object content
    /// * `content_length` - Expected size of the content, if known
    /// * `content_type` - MIME type recorded on the object
    /// * `acl` - Visibility of the stored object
    async fn put_stream(
        &self,
        key: &str,
        reader: ObjectReader,
        content_length: Option<u64>,
        content_type: &str,
        acl: ObjectAcl,
    ) -> StorageResult<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

/// Reject keys that could escape the bucket root or base directory.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.contains("..") || key.starts_with('/') {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("1700000000000abcdef.png").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("/etc/passwd").is_err());
    }
}
