use axum::{http::StatusCode, response::IntoResponse, Json};

/// Liveness probe - the process is up and serving requests
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "alive"
        })),
    )
}
