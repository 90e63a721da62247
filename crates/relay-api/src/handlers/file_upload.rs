use std::sync::Arc;

use axum::extract::{multipart::MultipartRejection, Multipart, State};
use relay_core::AppError;

use crate::error::HttpAppError;
use crate::services::upload::UploadService;
use crate::state::AppState;
use crate::utils::upload::stage_multipart_file;

/// Upload file handler
///
/// Accepts any file in the multipart field `file` and streams it to storage
/// unchanged, tagged with the declared content type.
#[tracing::instrument(skip_all, fields(operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<String, HttpAppError> {
    let multipart = multipart.map_err(|e| {
        HttpAppError(AppError::InvalidInput(format!(
            "Expected a multipart/form-data body: {}",
            e.body_text()
        )))
    })?;

    let validator = state.file_validator();
    let staged = stage_multipart_file(multipart, &state.scratch, &validator).await?;

    UploadService::new(&state).store_file(staged).await
}
