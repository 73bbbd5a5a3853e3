//! Engine status handler.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use sunset_domain::error::{SunsetError, UnavailableError};
use sunset_domain::status::Status;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the status endpoint.
pub enum GetResponse {
    Ok(Json<Status>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/status`
pub async fn get(State(state): State<AppState>) -> Result<GetResponse, ApiError> {
    let status = state
        .status
        .latest()
        .ok_or(SunsetError::Unavailable(UnavailableError))?;
    Ok(GetResponse::Ok(Json(status)))
}
