use std::sync::Arc;

use crate::state::AppState;

/// Runs the storage half of an upload for one request
pub struct UploadService {
    pub(super) state: Arc<AppState>,
}

impl UploadService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }
}
