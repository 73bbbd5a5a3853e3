//! # sunset-domain
//!
//! Pure domain model for sunset, which shifts light color temperature and
//! brightness over the day without fighting manual changes.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, wall clock
//! - Light value objects: capabilities, Kelvin/mired color temperature,
//!   observations, combined commands
//! - Validated [`settings`](crate::settings::Settings) (schedule + levels)
//! - Time anchoring and the daytime/redshift/brightness calculators
//! - The state tracker, exclusion set, override policy and mode controller
//! - The closed set of control commands and the published status
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod calculator;
pub mod command;
pub mod exclusion;
pub mod light;
pub mod mode;
pub mod policy;
pub mod settings;
pub mod status;
pub mod tracker;
