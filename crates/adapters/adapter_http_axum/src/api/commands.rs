//! Control command handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use sunset_domain::command::Command;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the commands endpoint.
pub enum ExecuteResponse {
    NoContent,
}

impl IntoResponse for ExecuteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `POST /api/commands`
///
/// Waits until the driver has executed the command, including any immediate
/// reconciliation pass it triggers.
pub async fn execute(
    State(state): State<AppState>,
    Json(command): Json<Command>,
) -> Result<ExecuteResponse, ApiError> {
    tracing::debug!(service = %command, "command received");
    state.commands.send(command).await?;
    Ok(ExecuteResponse::NoContent)
}
