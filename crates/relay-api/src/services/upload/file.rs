use relay_core::AppError;
use relay_processing::StagedFile;
use relay_storage::{ObjectAcl, ObjectReader};

use super::UploadService;
use crate::error::HttpAppError;

impl UploadService {
    /// Stream a staged file to storage under its staging name.
    ///
    /// The staged file is removed only after a successful put. On failure it
    /// is left in scratch storage and its path is logged.
    pub async fn store_file(&self, staged: StagedFile) -> Result<String, HttpAppError> {
        let start = std::time::Instant::now();

        let file = staged.open().await.map_err(|e| {
            HttpAppError(AppError::Internal(format!(
                "Failed to open staged file: {}",
                e
            )))
        })?;
        let reader: ObjectReader = Box::pin(file);

        let result = self
            .state
            .storage
            .put_stream(
                &staged.name,
                reader,
                Some(staged.size),
                &staged.content_type,
                ObjectAcl::PublicRead,
            )
            .await;

        match result {
            Ok(url) => {
                staged.remove().await;
                tracing::info!(
                    key = %staged.name,
                    original_filename = %staged.original_filename,
                    content_type = %staged.content_type,
                    size_bytes = staged.size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "File upload stored"
                );
                Ok(url)
            }
            Err(e) => {
                tracing::warn!(
                    path = %staged.path.display(),
                    key = %staged.name,
                    "Storage upload failed; staged file kept"
                );
                Err(e.into())
            }
        }
    }
}
