//! Route configuration and setup

use crate::handlers;
use crate::middleware::error_status_middleware;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and part headers on top of a file ceiling.
///
/// The framework limit sits above the pipeline ceiling so the intake, not
/// axum, reports oversized files.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router {
    let limits = &state.config.limits;
    let image_body_limit = limits.image_max_file_size + MULTIPART_OVERHEAD_BYTES;
    let file_body_limit = limits.file_max_file_size + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route(
            "/upload/image",
            post(handlers::image_upload::upload_image)
                .layer(DefaultBodyLimit::max(image_body_limit)),
        )
        .route(
            "/upload/file",
            post(handlers::file_upload::upload_file).layer(DefaultBodyLimit::max(file_body_limit)),
        )
        .route("/live", get(handlers::health::liveness_check))
        .layer(axum::middleware::from_fn_with_state(
            state.config.error_status_mode,
            error_status_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
