//! # sunset-app
//!
//! Application layer: the reconciliation engine and its **port definitions**.
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement:
//!   - `LightStateProvider`: list on lights, read one light's attributes
//!   - `LightCommander`: apply a combined light command
//!   - `EntityGrouping`: resolve devices and areas into lights
//!   - `StatusPublisher`: receive the engine status after each pass
//! - Provide the [`Engine`](engine::Engine): one tick entry point plus the
//!   closed set of control commands
//! - Provide the driver that runs the engine on a fixed period and serialises
//!   control commands between ticks
//! - Provide **in-process infrastructure** (status bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `sunset-domain` only (plus `tokio` for channels and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod driver;
pub mod engine;
pub mod ports;
pub mod status_bus;
