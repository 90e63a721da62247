use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use relay_core::ErrorStatusMode;

use crate::error::ErrorResponseMarker;

/// Apply the configured status policy to error responses.
///
/// In `compat` mode every response rendered from an `HttpAppError` is sent
/// as 422 Unprocessable Entity; in `semantic` mode it is left untouched.
pub async fn error_status_middleware(
    State(mode): State<ErrorStatusMode>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    if mode == ErrorStatusMode::Compat
        && response.extensions().get::<ErrorResponseMarker>().is_some()
    {
        *response.status_mut() = StatusCode::UNPROCESSABLE_ENTITY;
    }

    response
}
