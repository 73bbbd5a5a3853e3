//! In-process status bus backed by a tokio watch channel.

use tokio::sync::watch;

use sunset_domain::error::SunsetError;
use sunset_domain::status::Status;

use crate::ports::StatusPublisher;

/// In-process status bus using a tokio [`watch`] channel.
///
/// Only the latest status is kept; slow subscribers skip intermediate values.
/// Publishing succeeds even when there are no active subscribers.
pub struct InProcessStatusBus {
    sender: watch::Sender<Option<Status>>,
}

impl Default for InProcessStatusBus {
    fn default() -> Self {
        Self::new()
    }
}

impl InProcessStatusBus {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    /// The most recently published status, `None` before the first one.
    #[must_use]
    pub fn latest(&self) -> Option<Status> {
        *self.sender.borrow()
    }

    /// Subscribe to status changes.
    ///
    /// The receiver starts with the current value marked as seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Status>> {
        self.sender.subscribe()
    }
}

impl StatusPublisher for InProcessStatusBus {
    fn publish(&self, status: Status) -> Result<(), SunsetError> {
        self.sender.send_if_modified(|current| {
            if *current == Some(status) {
                false
            } else {
                *current = Some(status);
                true
            }
        });
        Ok(())
    }
}
