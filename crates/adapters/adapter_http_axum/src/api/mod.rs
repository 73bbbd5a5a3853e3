//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod commands;
pub mod sse;
#[allow(clippy::missing_errors_doc)]
pub mod status;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(status::get))
        .route("/status/stream", get(sse::stream))
        .route("/commands", post(commands::execute))
}
