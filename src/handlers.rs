pub mod health;
pub mod trails;
pub mod users;

use axum::{http::StatusCode, response::Json};
use model::StoreError;
use model::store::FetchMode;
use tracing::error;

use crate::schemas::{ApiError, ErrorResponse};

/// Map a data-access failure onto an HTTP status and error body
pub(crate) fn store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::UserNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(err.to_string(), "USER_NOT_FOUND")),
        ),
        StoreError::TrailNotFound { .. } => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(err.to_string(), "TRAIL_NOT_FOUND")),
        ),
        StoreError::Database(ref db_error) => {
            error!("Database error: {}", db_error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error", "DATABASE_ERROR")),
            )
        }
    }
}

/// Parse the `fetch` query parameter. Missing means eager.
pub(crate) fn parse_fetch_mode(fetch: Option<&str>) -> Result<FetchMode, ApiError> {
    match fetch.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        None | Some("eager") => Ok(FetchMode::Eager),
        Some("deferred") => Ok(FetchMode::Deferred),
        Some(other) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                format!("Invalid fetch mode '{}', expected 'eager' or 'deferred'", other),
                "INVALID_FETCH_MODE",
            )),
        )),
    }
}
