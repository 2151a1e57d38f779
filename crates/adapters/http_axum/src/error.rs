//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use devmon_domain::error::DevmonError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`DevmonError`] to an HTTP response with appropriate status code.
pub struct ApiError(DevmonError);

impl From<DevmonError> for ApiError {
    fn from(err: DevmonError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DevmonError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            DevmonError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            DevmonError::Conflict(err) => (StatusCode::CONFLICT, err.to_string()),
            DevmonError::CapacityExceeded(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            DevmonError::Storage(err) => {
                tracing::error!(error = ?err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
