//! Image processing module
//!
//! Width-bounded downscaling for the image upload pipeline.

pub mod transformer;

pub use transformer::{ImageTransformError, ImageTransformer, TransformedImage};
