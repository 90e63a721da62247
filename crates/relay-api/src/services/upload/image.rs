use bytes::Bytes;
use relay_core::{generate_object_name, AppError};
use relay_processing::{ImageTransformer, StagedFile};
use relay_storage::ObjectAcl;

use super::UploadService;
use crate::error::HttpAppError;

impl UploadService {
    /// Downscale a staged image to `target_width` and store it.
    ///
    /// The staged file is deleted as soon as its bytes are in memory, or when
    /// reading or transforming it fails. Returns the public URL.
    pub async fn store_image(
        &self,
        staged: StagedFile,
        target_width: u32,
    ) -> Result<String, HttpAppError> {
        let start = std::time::Instant::now();

        let data = match staged.read().await {
            Ok(data) => data,
            Err(e) => {
                staged.remove().await;
                return Err(HttpAppError(AppError::Internal(format!(
                    "Failed to read staged image: {}",
                    e
                ))));
            }
        };

        let transformed =
            match ImageTransformer::fit_to_width_blocking(Bytes::from(data), target_width).await {
                Ok(transformed) => transformed,
                Err(e) => {
                    staged.remove().await;
                    return Err(e.into());
                }
            };
        staged.remove().await;

        let key = generate_object_name(&staged.extension);
        let size = transformed.data.len();

        let url = self
            .state
            .storage
            .put(
                &key,
                transformed.data,
                &staged.content_type,
                ObjectAcl::PublicRead,
            )
            .await?;

        tracing::info!(
            key = %key,
            original_filename = %staged.original_filename,
            original_width = transformed.original_width,
            original_height = transformed.original_height,
            width = transformed.width,
            height = transformed.height,
            resized = transformed.resized,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Image upload stored"
        );

        Ok(url)
    }
}
