//! Shared application state for axum handlers.

use std::sync::Arc;

use sunset_app::driver::EngineHandle;
use sunset_app::status_bus::InProcessStatusBus;

/// Application state shared across all axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Queue into the engine driver.
    pub commands: EngineHandle,
    /// Latest engine status and change notifications.
    pub status: Arc<InProcessStatusBus>,
}

impl AppState {
    #[must_use]
    pub fn new(commands: EngineHandle, status: Arc<InProcessStatusBus>) -> Self {
        Self { commands, status }
    }
}
