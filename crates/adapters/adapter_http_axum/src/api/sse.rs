//! Server-Sent Events (SSE) stream of engine status changes.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::WatchStream;

use crate::state::AppState;

/// `GET /api/status/stream`: SSE stream of status changes.
///
/// The current status is sent first, then one JSON `data:` frame per change.
/// Intermediate values are skipped for slow clients. The stream continues
/// until the client disconnects or the status bus is dropped.
pub async fn stream(
    State(state): State<AppState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let status_stream = WatchStream::new(state.status.subscribe()).filter_map(|status| {
        let status = status?;
        match serde_json::to_string(&status) {
            Ok(json) => Some(Ok(Event::default().data(json))),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize status for SSE stream");
                None
            }
        }
    });

    Sse::new(status_stream).keep_alive(KeepAlive::default())
}
