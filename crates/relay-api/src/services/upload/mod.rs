//! Upload pipelines
//!
//! Both pipelines start from a file already staged in scratch storage and
//! end with one storage call. The image pipeline downscales before storing;
//! the file pipeline streams the staged bytes unchanged.

mod file;
mod image;
mod service;

pub use service::UploadService;
