//! Status port: publishes the engine's effective targets.

use std::sync::Arc;

use sunset_domain::error::SunsetError;
use sunset_domain::status::Status;

/// Receives the engine status after every pass.
///
/// Publishing is synchronous: the engine publishes from inside a pass and
/// must not suspend on a slow consumer.
pub trait StatusPublisher {
    /// Replace the current status.
    ///
    /// # Errors
    ///
    /// Implementations may fail when their sink is gone; the engine logs and
    /// carries on.
    fn publish(&self, status: Status) -> Result<(), SunsetError>;
}

impl<T: StatusPublisher + Send + Sync> StatusPublisher for Arc<T> {
    fn publish(&self, status: Status) -> Result<(), SunsetError> {
        (**self).publish(status)
    }
}
