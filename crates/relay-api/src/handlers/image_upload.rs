use std::sync::Arc;

use axum::extract::{
    multipart::MultipartRejection, rejection::QueryRejection, Multipart, Query, State,
};
use relay_core::AppError;

use crate::error::HttpAppError;
use crate::services::upload::UploadService;
use crate::state::AppState;
use crate::utils::upload::stage_multipart_file;

/// First `width` value in the query string. Later repeats are ignored.
fn first_width(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == "width")
        .map(|(_, value)| value.as_str())
}

/// Resolve the target width, falling back to the configured default.
fn parse_width(raw: Option<&str>, default_width: u32) -> Result<u32, AppError> {
    let Some(raw) = raw else {
        return Ok(default_width);
    };

    match raw.trim().parse::<u32>() {
        Ok(width) if width > 0 => Ok(width),
        _ => Err(AppError::InvalidInput(format!(
            "width must be a positive integer, got '{}'",
            raw
        ))),
    }
}

/// Upload image handler
///
/// Accepts one png/jpg/jpeg in the multipart field `file`, scales it down
/// to `width` pixels (default from configuration) when it is wider, stores
/// it and answers with the public URL as plain text.
#[tracing::instrument(skip_all, fields(operation = "upload_image", width))]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<String, HttpAppError> {
    let Query(pairs) = query.map_err(|e| {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid query string: {}",
            e.body_text()
        )))
    })?;
    let width = parse_width(
        first_width(&pairs),
        state.config.limits.default_resize_width,
    )?;
    tracing::Span::current().record("width", width);

    let multipart = multipart.map_err(|e| {
        HttpAppError(AppError::InvalidInput(format!(
            "Expected a multipart/form-data body: {}",
            e.body_text()
        )))
    })?;

    let validator = state.image_validator();
    let staged = stage_multipart_file(multipart, &state.scratch, &validator).await?;

    UploadService::new(&state).store_image(staged, width).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_defaults_when_absent() {
        assert_eq!(parse_width(None, 400).unwrap(), 400);
    }

    #[test]
    fn test_width_parses_positive_integers() {
        assert_eq!(parse_width(Some("120"), 400).unwrap(), 120);
        assert_eq!(parse_width(Some(" 800 "), 400).unwrap(), 800);
    }

    #[test]
    fn test_first_width_wins_over_repeats() {
        let pairs = vec![
            ("other".to_string(), "x".to_string()),
            ("width".to_string(), "100".to_string()),
            ("width".to_string(), "200".to_string()),
        ];
        assert_eq!(first_width(&pairs), Some("100"));
        assert_eq!(first_width(&[]), None);
    }

    #[test]
    fn test_width_rejects_invalid_values() {
        for raw in ["0", "-5", "abc", "12.5", ""] {
            assert!(
                matches!(parse_width(Some(raw), 400), Err(AppError::InvalidInput(_))),
                "{:?} should be rejected",
                raw
            );
        }
    }
}
