//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the reconciliation engine and the host
//! that owns the lights. They are defined here (in `app`) so that both the
//! engine and the adapter layer can depend on them without creating circular
//! dependencies.

pub mod grouping;
pub mod lights;
pub mod status;

pub use grouping::EntityGrouping;
pub use lights::{LightCommander, LightStateProvider};
pub use status::StatusPublisher;
