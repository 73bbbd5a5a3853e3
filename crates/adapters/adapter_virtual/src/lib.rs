//! # sunset-adapter-virtual
//!
//! Virtual/demo integration that provides simulated lights for testing and
//! demonstration purposes.
//!
//! [`VirtualLights`] implements every light-side port of `sunset-app`:
//! the state provider, the commander and the entity grouping. Like real
//! bulbs, lights store color temperature in mireds, so a value read back may
//! differ from the commanded Kelvin by rounding.
//!
//! ## Demo lights
//!
//! | Entity ID | Area | Capabilities |
//! |-----------|------|--------------|
//! | `light.living_room_ceiling` | `living_room` | color temperature, brightness |
//! | `light.living_room_lamp` | `living_room` | brightness |
//! | `light.bedroom` | `bedroom` | color temperature (2200K–6500K), brightness |
//! | `light.hallway` | `hallway` | on/off only |
//!
//! ## Dependency rule
//!
//! Depends on `sunset-app` (port traits) and `sunset-domain` only.

mod light;

use std::collections::{BTreeMap, HashSet};
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use sunset_app::ports::{EntityGrouping, LightCommander, LightStateProvider};
use sunset_domain::error::{IntegrationError, NotFoundError, SunsetError};
use sunset_domain::id::{AreaId, DeviceId, LightId};
use sunset_domain::light::{Brightness, ColorTemp, LightCommand, LightObservation};

pub use light::VirtualLightSpec;

use light::VirtualLight;

/// A set of simulated lights keyed by id.
#[derive(Default)]
pub struct VirtualLights {
    lights: Mutex<BTreeMap<LightId, VirtualLight>>,
    failing: Mutex<HashSet<LightId>>,
}

impl VirtualLights {
    /// Create the lights, all switched off.
    #[must_use]
    pub fn new(specs: impl IntoIterator<Item = VirtualLightSpec>) -> Self {
        let lights = specs
            .into_iter()
            .map(|spec| (spec.id.clone(), VirtualLight::new(spec)))
            .collect();
        Self {
            lights: Mutex::new(lights),
            failing: Mutex::default(),
        }
    }

    /// Four lights across three areas; the living room and hallway ones
    /// start on.
    #[must_use]
    pub fn demo() -> Self {
        let lights = Self::new([
            VirtualLightSpec::color("light.living_room_ceiling")
                .device("ceiling_fixture")
                .area("living_room"),
            VirtualLightSpec::dimmable("light.living_room_lamp")
                .device("floor_lamp")
                .area("living_room"),
            VirtualLightSpec::color("light.bedroom")
                .device("bedside")
                .area("bedroom")
                .range(2200, 6500),
            VirtualLightSpec::on_off("light.hallway")
                .device("hallway_switch")
                .area("hallway"),
        ]);
        lights.turn_on(&LightId::new("light.living_room_ceiling"));
        lights.turn_on(&LightId::new("light.living_room_lamp"));
        lights.turn_on(&LightId::new("light.hallway"));
        lights
    }

    /// Current attributes of `light`, `None` if unknown.
    #[must_use]
    pub fn observation(&self, light: &LightId) -> Option<LightObservation> {
        self.lock_lights().get(light).map(VirtualLight::observe)
    }

    /// Switch a light on without touching its attributes, as a wall switch
    /// would. Returns `false` for an unknown light.
    pub fn turn_on(&self, light: &LightId) -> bool {
        self.edit(light, |l| l.on = true)
    }

    pub fn turn_off(&self, light: &LightId) -> bool {
        self.edit(light, |l| l.on = false)
    }

    /// Change a light's color temperature the way an external actor would.
    pub fn set_color_temp(&self, light: &LightId, color_temp: ColorTemp) -> bool {
        self.edit(light, |l| l.set_color_temp(color_temp))
    }

    /// Change a light's brightness the way an external actor would.
    pub fn set_brightness(&self, light: &LightId, brightness: Brightness) -> bool {
        self.edit(light, |l| l.set_brightness(brightness))
    }

    /// Make every later command for `light` fail until cleared.
    pub fn fail_commands_for(&self, light: &LightId, fail: bool) {
        let mut failing = self.failing.lock().unwrap_or_else(PoisonError::into_inner);
        if fail {
            failing.insert(light.clone());
        } else {
            failing.remove(light);
        }
    }

    fn edit(&self, light: &LightId, f: impl FnOnce(&mut VirtualLight)) -> bool {
        self.lock_lights().get_mut(light).map(f).is_some()
    }

    fn members(&self, matches: impl Fn(&VirtualLightSpec) -> bool) -> Vec<LightId> {
        self.lock_lights()
            .values()
            .filter(|l| matches(&l.spec))
            .map(|l| l.spec.id.clone())
            .collect()
    }

    fn lock_lights(&self) -> MutexGuard<'_, BTreeMap<LightId, VirtualLight>> {
        self.lights.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, command: &LightCommand) -> Result<(), SunsetError> {
        let failing = self
            .failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&command.light_id);
        if failing {
            return Err(IntegrationError::new(command.light_id.as_str(), "light unreachable").into());
        }
        let mut lights = self.lock_lights();
        let light = lights
            .get_mut(&command.light_id)
            .ok_or_else(|| NotFoundError {
                entity: "Light",
                id: command.light_id.to_string(),
            })?;
        light.apply(command);
        tracing::debug!(light = %command.light_id, "virtual light updated");
        Ok(())
    }
}

impl LightStateProvider for VirtualLights {
    /// On lights sorted by id.
    fn list_on_lights(&self) -> impl Future<Output = Result<Vec<LightId>, SunsetError>> + Send {
        let on: Vec<LightId> = self
            .lock_lights()
            .values()
            .filter(|l| l.on)
            .map(|l| l.spec.id.clone())
            .collect();
        async { Ok(on) }
    }

    fn get(
        &self,
        light: &LightId,
    ) -> impl Future<Output = Result<Option<LightObservation>, SunsetError>> + Send {
        let observation = self.observation(light);
        async { Ok(observation) }
    }
}

impl LightCommander for VirtualLights {
    fn set_light(
        &self,
        command: &LightCommand,
    ) -> impl Future<Output = Result<(), SunsetError>> + Send {
        let result = self.apply(command);
        async { result }
    }
}

impl EntityGrouping for VirtualLights {
    fn entities_for_device(
        &self,
        device: &DeviceId,
    ) -> impl Future<Output = Result<Vec<LightId>, SunsetError>> + Send {
        let members = self.members(|spec| spec.device.as_ref() == Some(device));
        async { Ok(members) }
    }

    fn entities_for_area(
        &self,
        area: &AreaId,
    ) -> impl Future<Output = Result<Vec<LightId>, SunsetError>> + Send {
        let members = self.members(|spec| spec.area.as_ref() == Some(area));
        async { Ok(members) }
    }
}
