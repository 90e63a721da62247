//! Upload Relay Storage Library
//!
//! This crate provides the storage abstraction the upload pipelines write
//! their final objects to, with S3 and local filesystem implementations.
//!
//! # Storage key format
//!
//! Keys are flat generated names (`<timestamp><hex>.<ext>`, see
//! `relay_core::naming`). Keys must not contain `..` or a leading `/`.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;
pub mod unconfigured;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use relay_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::{S3Settings, S3Storage};
pub use traits::{ObjectAcl, ObjectReader, Storage, StorageError, StorageResult};
pub use unconfigured::UnconfiguredStorage;
