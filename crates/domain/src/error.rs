//! Common error types used across the workspace.
//!
//! Each failure family is its own typed error; [`SunsetError`] aggregates
//! them with `#[from]` conversions so callers can use `?` freely.

/// Top-level error returned by domain and application operations.
#[derive(Debug, thiserror::Error)]
pub enum SunsetError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("integration error")]
    Integration(#[from] IntegrationError),

    #[error("engine unavailable")]
    Unavailable(#[from] UnavailableError),
}

/// Rejected input: configuration values, identifiers, command payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("identifier must not be empty")]
    EmptyId,

    #[error("{field}: invalid time of day {value:?}, expected HH:MM or HH:MM:SS")]
    InvalidTimeOfDay { field: &'static str, value: String },

    #[error("evening_time and night_time must differ")]
    ZeroLengthEvening,

    #[error("{field}: color temperature must be positive, got {value}")]
    InvalidColorTemp { field: &'static str, value: i64 },

    #[error("{field}: brightness must be within 1..=255, got {value}")]
    InvalidBrightness { field: &'static str, value: i64 },
}

/// A lookup that found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Failure reported by an external collaborator (light query or command).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{target}: {message}")]
pub struct IntegrationError {
    pub target: String,
    pub message: String,
}

impl IntegrationError {
    #[must_use]
    pub fn new(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            message: message.into(),
        }
    }
}

/// The engine driver is no longer accepting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("engine driver has stopped")]
pub struct UnavailableError;
