//! # sunset-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON control surface**: `POST /api/commands` accepts one
//!   control command (`activate_color`, `dont_touch`, …) and forwards it to
//!   the engine driver
//! - Serve the engine **status** (`GET /api/status`) and a live
//!   **SSE stream** of status changes (`GET /api/status/stream`)
//! - Map engine errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `sunset-app` (driver handle, status bus) and `sunset-domain`
//! (command and status types). Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
