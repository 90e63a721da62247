//! Storage setup and initialization

use relay_core::Config;
use relay_storage::{create_storage, Storage};
use std::sync::Arc;

/// Build the storage backend selected by `config`.
///
/// Never fails: a backend that cannot be built is replaced by one that
/// rejects every upload with the configuration problem.
pub async fn setup_storage(config: &Config) -> Arc<dyn Storage> {
    tracing::info!(backend = %config.storage_backend, "Initializing storage...");

    let missing = config.missing_storage_settings();
    if !missing.is_empty() {
        tracing::warn!(
            backend = %config.storage_backend,
            missing = %missing.join(","),
            "Storage settings missing"
        );
    }

    let storage = create_storage(config).await;
    tracing::info!(
        backend = ?storage.backend_type(),
        "Storage initialized"
    );

    storage
}
