pub mod file_upload;
pub mod health;
pub mod image_upload;
