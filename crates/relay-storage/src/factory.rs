#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::{S3Settings, S3Storage};
use crate::{Storage, StorageBackend, StorageError, UnconfiguredStorage};
use relay_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration
///
/// Configuration problems never fail startup: the backend is replaced by an
/// [`UnconfiguredStorage`] that reports the problem on every upload.
pub async fn create_storage(config: &Config) -> Arc<dyn Storage> {
    let backend = config.storage_backend;

    match build_backend(config).await {
        Ok(storage) => storage,
        Err(e) => {
            tracing::warn!(
                backend = %backend,
                error = %e,
                "Storage backend unavailable; uploads will fail until it is configured"
            );
            Arc::new(UnconfiguredStorage::new(backend, e.to_string()))
        }
    }
}

async fn build_backend(config: &Config) -> Result<Arc<dyn Storage>, StorageError> {
    match config.storage_backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let bucket = config.s3_bucket.clone().ok_or_else(|| {
                StorageError::ConfigError("AWS_BUCKET_NAME not configured".to_string())
            })?;

            let storage = S3Storage::new(S3Settings {
                bucket,
                region: config.s3_region.clone(),
                endpoint_url: config.s3_endpoint.clone(),
                access_key_id: config.aws_access_key_id.clone(),
                secret_access_key: config.aws_secret_access_key.clone(),
            })?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_url = config.local_storage_base_url.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
            })?;

            let storage = LocalStorage::new(base_path, base_url).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
