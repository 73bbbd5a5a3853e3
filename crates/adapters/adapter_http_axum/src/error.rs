//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use sunset_domain::error::SunsetError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`SunsetError`] to an HTTP response with appropriate status code.
pub struct ApiError(SunsetError);

impl From<SunsetError> for ApiError {
    fn from(err: SunsetError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            SunsetError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            SunsetError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            SunsetError::Integration(err) => {
                tracing::warn!(error = %err, "integration error");
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            SunsetError::Unavailable(err) => {
                tracing::error!(error = %err, "engine unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
