//! Engine driver: the single task that owns the engine.
//!
//! Ticks fire on a fixed period and control commands arrive through an
//! [`EngineHandle`]. Both are handled one at a time on the driver task, so a
//! tick never overlaps another tick or a command.

use std::future::Future;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{error, info, warn};

use sunset_domain::command::Command;
use sunset_domain::error::{SunsetError, UnavailableError};
use sunset_domain::time::{self, WallClock};

use crate::engine::Engine;
use crate::ports::{EntityGrouping, LightCommander, LightStateProvider, StatusPublisher};

/// Tick period used by the daemon.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

const QUEUE_CAPACITY: usize = 32;

struct Request {
    command: Command,
    reply: oneshot::Sender<Result<(), SunsetError>>,
}

/// Cloneable sender of control commands to a running [`EngineDriver`].
#[derive(Clone)]
pub struct EngineHandle {
    sender: mpsc::Sender<Request>,
}

impl EngineHandle {
    /// Queue `command` and wait until the driver has executed it.
    ///
    /// # Errors
    ///
    /// Returns [`UnavailableError`] when the driver has stopped, or the
    /// engine's error for the command.
    pub async fn send(&self, command: Command) -> Result<(), SunsetError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(Request { command, reply })
            .await
            .map_err(|_| UnavailableError)?;
        response.await.map_err(|_| UnavailableError)?
    }
}

/// Owns an [`Engine`] and drives it until shutdown.
pub struct EngineDriver<P, C, G, S> {
    engine: Engine<P, C, G, S>,
    period: Duration,
    clock: fn() -> WallClock,
    requests: mpsc::Receiver<Request>,
}

impl<P, C, G, S> EngineDriver<P, C, G, S>
where
    P: LightStateProvider,
    C: LightCommander,
    G: EntityGrouping,
    S: StatusPublisher,
{
    #[must_use]
    pub fn new(engine: Engine<P, C, G, S>, period: Duration) -> (Self, EngineHandle) {
        let (sender, requests) = mpsc::channel(QUEUE_CAPACITY);
        let driver = Self {
            engine,
            period,
            clock: time::now,
            requests,
        };
        (driver, EngineHandle { sender })
    }

    /// Replace the wall clock passed to the engine.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> WallClock) -> Self {
        self.clock = clock;
        self
    }

    /// Run until `shutdown` resolves.
    ///
    /// The first tick fires one period after start; the engine already
    /// published its initial status. A slow tick delays the next one instead
    /// of letting ticks pile up.
    pub async fn run(mut self, shutdown: impl Future<Output = ()>) {
        let mut interval = tokio::time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!(period_ms = self.period.as_millis(), "engine driver started");
        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = interval.tick() => {
                    if let Err(err) = self.engine.tick((self.clock)()).await {
                        error!(error = %err, "tick failed");
                    }
                }
                Some(request) = self.requests.recv() => {
                    let result = self.engine.execute(request.command, (self.clock)()).await;
                    if let Err(err) = &result {
                        warn!(error = %err, "control command failed");
                    }
                    // The caller may have given up waiting.
                    let _ = request.reply.send(result);
                }
            }
        }
        info!("engine driver stopped");
    }
}
