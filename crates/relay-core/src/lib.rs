//! Upload Relay Core Library
//!
//! This crate provides the configuration, error types and naming helpers
//! shared by the storage, processing and API crates.

pub mod config;
pub mod error;
pub mod naming;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, ErrorStatusMode, UploadLimits};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use naming::generate_object_name;
pub use storage_types::StorageBackend;
