//! Light ports: reading live light state and issuing light commands.

use std::future::Future;
use std::sync::Arc;

use sunset_domain::error::SunsetError;
use sunset_domain::id::LightId;
use sunset_domain::light::{LightCommand, LightObservation};

/// Read-only view of the host's lights.
pub trait LightStateProvider {
    /// Ids of every light currently on.
    fn list_on_lights(&self) -> impl Future<Output = Result<Vec<LightId>, SunsetError>> + Send;

    /// Live attributes of one light, `None` if the host no longer knows it.
    fn get(
        &self,
        light: &LightId,
    ) -> impl Future<Output = Result<Option<LightObservation>, SunsetError>> + Send;
}

/// Applies combined commands to the host's lights.
pub trait LightCommander {
    /// Issue one `turn_on` carrying every attribute in `command`.
    fn set_light(
        &self,
        command: &LightCommand,
    ) -> impl Future<Output = Result<(), SunsetError>> + Send;
}

impl<T: LightStateProvider + Send + Sync> LightStateProvider for Arc<T> {
    fn list_on_lights(&self) -> impl Future<Output = Result<Vec<LightId>, SunsetError>> + Send {
        (**self).list_on_lights()
    }

    fn get(
        &self,
        light: &LightId,
    ) -> impl Future<Output = Result<Option<LightObservation>, SunsetError>> + Send {
        (**self).get(light)
    }
}

impl<T: LightCommander + Send + Sync> LightCommander for Arc<T> {
    fn set_light(
        &self,
        command: &LightCommand,
    ) -> impl Future<Output = Result<(), SunsetError>> + Send {
        (**self).set_light(command)
    }
}
