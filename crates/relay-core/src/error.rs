//! Error types module
//!
//! Every failure a request can hit is represented by [`AppError`]. Domain
//! errors from the storage and processing crates convert into it at the
//! pipeline boundary; the API crate turns it into a single HTTP response.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for malformed requests
    Debug,
    /// Warning level - for rejected uploads
    Warn,
    /// Error level - for infrastructure failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code describing the error's actual cause
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unsupported file type '{extension}' (allowed: {})", .allowed.join(", "))]
    InvalidFileType {
        extension: String,
        allowed: &'static [&'static str],
    },

    #[error("File exceeds the maximum size of {max} bytes")]
    PayloadTooLarge { max: usize },

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl AppError {
    /// Get the error type name for logs
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidFileType { .. } => "InvalidFileType",
            AppError::PayloadTooLarge { .. } => "PayloadTooLarge",
            AppError::ImageProcessing(_) => "ImageProcessing",
            AppError::Storage(_) => "Storage",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::InvalidFileType { .. } => 415,
            AppError::PayloadTooLarge { .. } => 413,
            AppError::ImageProcessing(_) => 422,
            AppError::Storage(_) => 502,
            AppError::InvalidInput(_) => 400,
            AppError::Internal(_) => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidFileType { .. } => "INVALID_FILE_TYPE",
            AppError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            AppError::ImageProcessing(_) => "IMAGE_PROCESSING_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidFileType { .. } | AppError::PayloadTooLarge { .. } => {
                format!("There was an error uploading a file: {}", self)
            }
            AppError::ImageProcessing(ref msg) => {
                format!("There was an error processing an image: {}", msg)
            }
            AppError::Storage(ref msg) => {
                format!("There was an error uploading to storage: {}", msg)
            }
            AppError::InvalidInput(ref msg) => format!("Invalid request: {}", msg),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_) => LogLevel::Debug,
            AppError::InvalidFileType { .. }
            | AppError::PayloadTooLarge { .. }
            | AppError::ImageProcessing(_) => LogLevel::Warn,
            AppError::Storage(_) | AppError::Internal(_) => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_invalid_file_type() {
        let err = AppError::InvalidFileType {
            extension: "gif".to_string(),
            allowed: &["png", "jpg"],
        };
        assert_eq!(err.http_status_code(), 415);
        assert_eq!(err.error_code(), "INVALID_FILE_TYPE");
        assert_eq!(
            err.client_message(),
            "There was an error uploading a file: Unsupported file type 'gif' (allowed: png, jpg)"
        );
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_error_metadata_storage() {
        let err = AppError::Storage("AccessDenied".to_string());
        assert_eq!(err.http_status_code(), 502);
        assert!(err.client_message().contains("AccessDenied"));
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_image_processing_keeps_cause() {
        let err = AppError::ImageProcessing("unexpected EOF".to_string());
        assert_eq!(
            err.client_message(),
            "There was an error processing an image: unexpected EOF"
        );
    }

    #[test]
    fn test_internal_hides_details() {
        let err = AppError::from(io::Error::new(io::ErrorKind::Other, "disk on fire"));
        assert_eq!(err.client_message(), "Internal server error");
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_payload_too_large_mentions_limit() {
        let err = AppError::PayloadTooLarge { max: 10_000_000 };
        assert_eq!(err.http_status_code(), 413);
        assert!(err.client_message().contains("10000000"));
    }
}
