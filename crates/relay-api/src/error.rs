//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Domain errors from the storage
//! and processing crates convert into [`AppError`] here, and every error is
//! logged before it is rendered as a plain-text response.
//!
//! The response carries the error's own status. In `compat` mode the
//! [`error_status_middleware`](crate::middleware::error_status_middleware)
//! rewrites it to 422 afterwards.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relay_core::{AppError, ErrorMetadata, LogLevel};
use relay_processing::{ImageExtension, ImageTransformError, StagingError, ValidationError};
use relay_storage::StorageError;

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from relay-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

/// Marks a response produced from an [`HttpAppError`]
#[derive(Debug, Clone, Copy)]
pub struct ErrorResponseMarker;

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<std::io::Error> for HttpAppError {
    fn from(err: std::io::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let error_code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(
                error = %error,
                error_type = error_type,
                error_code = error_code,
                "Error occurred"
            );
        }
        LogLevel::Warn => {
            tracing::warn!(
                error = %error,
                error_type = error_type,
                error_code = error_code,
                "Error occurred"
            );
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error,
                error_type = error_type,
                error_code = error_code,
                "Error occurred"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let mut response = (status, app_error.client_message()).into_response();
        response.extensions_mut().insert(ErrorResponseMarker);
        response
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::UploadFailed(msg) => AppError::Storage(msg),
            StorageError::InvalidKey(key) => {
                AppError::Storage(format!("Invalid storage key: {}", key))
            }
            StorageError::IoError(err) => AppError::Storage(format!("IO error: {}", err)),
            StorageError::ConfigError(msg) => {
                AppError::Storage(format!("Storage is not configured: {}", msg))
            }
        };
        HttpAppError(app)
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        let app = match err {
            ValidationError::FileTooLarge { max, .. } => AppError::PayloadTooLarge { max },
            ValidationError::InvalidFileType { extension } => AppError::InvalidFileType {
                extension,
                allowed: &ImageExtension::ACCEPTED,
            },
        };
        HttpAppError(app)
    }
}

impl From<StagingError> for HttpAppError {
    fn from(err: StagingError) -> Self {
        match err {
            StagingError::Validation(e) => e.into(),
            StagingError::Io(e) => {
                HttpAppError(AppError::Internal(format!("Failed to stage upload: {}", e)))
            }
        }
    }
}

impl From<ImageTransformError> for HttpAppError {
    fn from(err: ImageTransformError) -> Self {
        let app = match err {
            ImageTransformError::Task(msg) => AppError::Internal(msg),
            other => AppError::ImageProcessing(other.to_string()),
        };
        HttpAppError(app)
    }
}

impl HttpAppError {
    /// Map a multipart parsing failure.
    ///
    /// axum reports body-limit overflow as a multipart error with status 413;
    /// that becomes `PayloadTooLarge` for the pipeline's ceiling.
    pub fn from_multipart(err: MultipartError, max_file_size: usize) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            HttpAppError(AppError::PayloadTooLarge { max: max_file_size })
        } else {
            HttpAppError(AppError::InvalidInput(format!(
                "Failed to read multipart body: {}",
                err.body_text()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_error_upload_failed() {
        let HttpAppError(app_err) = StorageError::UploadFailed("bucket gone".to_string()).into();
        match app_err {
            AppError::Storage(msg) => assert_eq!(msg, "bucket gone"),
            other => panic!("Expected Storage variant, got {:?}", other),
        }
    }

    #[test]
    fn test_from_storage_config_error() {
        let HttpAppError(app_err) =
            StorageError::ConfigError("AWS_BUCKET_NAME not configured".to_string()).into();
        assert!(matches!(app_err, AppError::Storage(ref msg) if msg.contains("AWS_BUCKET_NAME")));
    }

    #[test]
    fn test_from_validation_errors() {
        let HttpAppError(too_large) = ValidationError::FileTooLarge { size: 11, max: 10 }.into();
        assert!(matches!(too_large, AppError::PayloadTooLarge { max: 10 }));

        let HttpAppError(bad_type) = ValidationError::InvalidFileType {
            extension: "gif".to_string(),
        }
        .into();
        assert!(matches!(
            bad_type,
            AppError::InvalidFileType { ref extension, .. } if extension == "gif"
        ));
        assert!(bad_type.to_string().ends_with("(allowed: png, jpg, jpeg)"));
    }

    #[test]
    fn test_staging_io_is_internal() {
        let err = StagingError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        let HttpAppError(app_err) = err.into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }

    #[test]
    fn test_response_is_plain_text_with_semantic_status() {
        let response = HttpAppError(AppError::InvalidFileType {
            extension: "gif".to_string(),
            allowed: &ImageExtension::ACCEPTED,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(response.extensions().get::<ErrorResponseMarker>().is_some());
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("text/plain"));
    }
}
