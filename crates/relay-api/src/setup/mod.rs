//! Application setup and initialization
//!
//! Everything `main` needs to go from a loaded [`Config`] to a router that
//! can be served.

pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use relay_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    validation::validate_config(&config).context("Configuration validation failed")?;
    tracing::info!(
        environment = %config.environment,
        error_status_mode = %config.error_status_mode,
        "Configuration loaded and validated successfully"
    );

    let storage = storage::setup_storage(&config).await;

    let state = Arc::new(AppState::new(config, storage));
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
