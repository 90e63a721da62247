//! Multipart intake shared by both upload pipelines

use axum::extract::Multipart;
use relay_core::AppError;
use relay_processing::{ScratchDir, StagedFile, UploadValidator};

use crate::error::HttpAppError;

/// Name of the multipart field carrying the upload
pub const FILE_FIELD: &str = "file";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Stream the `file` field of `multipart` into scratch storage.
///
/// Exactly one field named `file` is accepted; other fields are skipped. The
/// extension is checked against the validator's policy before anything is
/// written, and the size ceiling is enforced on every chunk. Whatever was
/// staged is removed again when the request turns out to be invalid.
pub async fn stage_multipart_file(
    mut multipart: Multipart,
    scratch: &ScratchDir,
    validator: &UploadValidator,
) -> Result<StagedFile, HttpAppError> {
    let max = validator.max_file_size();
    let mut staged: Option<StagedFile> = None;

    loop {
        let next = multipart
            .next_field()
            .await
            .map_err(|e| HttpAppError::from_multipart(e, max));

        let mut field = match next {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(discard_staged(staged, e).await),
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        if staged.is_some() {
            let err = HttpAppError(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
            return Err(discard_staged(staged, err).await);
        }

        let original_filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let extension = validator.extension_for(&original_filename)?;

        let mut writer = scratch.create(&extension, validator).await?;
        loop {
            let chunk = match field.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    writer.discard().await;
                    return Err(HttpAppError::from_multipart(e, max));
                }
            };

            if let Err(e) = writer.write_chunk(&chunk).await {
                writer.discard().await;
                return Err(e.into());
            }
        }

        let file = writer.finish(original_filename, content_type).await?;
        tracing::debug!(
            staged_name = %file.name,
            original_filename = %file.original_filename,
            content_type = %file.content_type,
            size_bytes = file.size,
            "Upload staged"
        );
        staged = Some(file);
    }

    staged.ok_or_else(|| HttpAppError(AppError::InvalidInput("No file provided".to_string())))
}

async fn discard_staged(staged: Option<StagedFile>, err: HttpAppError) -> HttpAppError {
    if let Some(file) = staged {
        file.remove().await;
    }
    err
}
