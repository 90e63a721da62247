//! Upload Relay Processing Library
//!
//! Intake validation, scratch staging and image transforms used by the
//! upload pipelines. Nothing in here talks to object storage.

pub mod extension;
#[cfg(feature = "image")]
pub mod image;
pub mod staging;
pub mod validator;

pub use extension::{file_extension, ImageExtension};
#[cfg(feature = "image")]
pub use image::{ImageTransformError, ImageTransformer, TransformedImage};
pub use staging::{ScratchDir, StagedFile, StagingError, StagingWriter};
pub use validator::{ExtensionPolicy, UploadValidator, ValidationError};
