//! Application state shared by every request.
//!
//! Built once at startup and never mutated afterwards; handlers receive it as
//! `State<Arc<AppState>>`.

use relay_core::Config;
use relay_processing::{ScratchDir, UploadValidator};
use relay_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub storage: Arc<dyn Storage>,
    pub scratch: ScratchDir,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        let scratch = ScratchDir::new(&config.scratch_dir);
        Self {
            config: Arc::new(config),
            storage,
            scratch,
        }
    }

    /// Intake rules for `/upload/image`
    pub fn image_validator(&self) -> UploadValidator {
        UploadValidator::images(self.config.limits.image_max_file_size)
    }

    /// Intake rules for `/upload/file`
    pub fn file_validator(&self) -> UploadValidator {
        UploadValidator::any_file(self.config.limits.file_max_file_size)
    }
}
