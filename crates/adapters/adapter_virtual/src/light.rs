//! Virtual light: a simulated bulb that stores color temperature in mireds.

use std::collections::BTreeSet;

use sunset_domain::id::{AreaId, DeviceId, LightId};
use sunset_domain::light::{Brightness, Capability, ColorTemp, LightCommand, LightObservation};

/// Static description of a simulated light.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualLightSpec {
    pub id: LightId,
    pub device: Option<DeviceId>,
    pub area: Option<AreaId>,
    pub capabilities: BTreeSet<Capability>,
    pub min_color_temp: ColorTemp,
    pub max_color_temp: ColorTemp,
}

impl VirtualLightSpec {
    /// A color-temperature light with a 2000K–6535K range.
    #[must_use]
    pub fn color(id: impl Into<String>) -> Self {
        Self::with_capabilities(id, [Capability::ColorTemp, Capability::Brightness])
    }

    /// A light that only dims.
    #[must_use]
    pub fn dimmable(id: impl Into<String>) -> Self {
        Self::with_capabilities(id, [Capability::Brightness])
    }

    /// A light that only switches on and off.
    #[must_use]
    pub fn on_off(id: impl Into<String>) -> Self {
        Self::with_capabilities(id, [Capability::OnOff])
    }

    fn with_capabilities(
        id: impl Into<String>,
        capabilities: impl IntoIterator<Item = Capability>,
    ) -> Self {
        Self {
            id: LightId::new(id),
            device: None,
            area: None,
            capabilities: capabilities.into_iter().collect(),
            min_color_temp: ColorTemp::from_kelvin(2000),
            max_color_temp: ColorTemp::from_kelvin(6535),
        }
    }

    #[must_use]
    pub fn device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(DeviceId::new(device));
        self
    }

    #[must_use]
    pub fn area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(AreaId::new(area));
        self
    }

    #[must_use]
    pub fn range(mut self, min_kelvin: u32, max_kelvin: u32) -> Self {
        self.min_color_temp = ColorTemp::from_kelvin(min_kelvin);
        self.max_color_temp = ColorTemp::from_kelvin(max_kelvin);
        self
    }
}

/// Mutable state of one simulated light.
#[derive(Debug, Clone)]
pub(crate) struct VirtualLight {
    pub(crate) spec: VirtualLightSpec,
    pub(crate) on: bool,
    color_temp: Option<ColorTemp>,
    brightness: Option<Brightness>,
}

impl VirtualLight {
    pub(crate) fn new(spec: VirtualLightSpec) -> Self {
        let color_temp = spec
            .capabilities
            .contains(&Capability::ColorTemp)
            .then_some(spec.max_color_temp);
        let brightness = spec
            .capabilities
            .iter()
            .any(|c| matches!(c, Capability::Brightness | Capability::ColorTemp))
            .then_some(254);
        Self {
            spec,
            on: false,
            color_temp,
            brightness,
        }
    }

    pub(crate) fn observe(&self) -> LightObservation {
        LightObservation {
            on: self.on,
            color_temp: self.color_temp,
            brightness: self.brightness,
            min_color_temp: self.spec.min_color_temp,
            max_color_temp: self.spec.max_color_temp,
            supported: self.spec.capabilities.clone(),
        }
    }

    /// Apply a `turn_on`; attributes the light cannot honour are ignored.
    pub(crate) fn apply(&mut self, command: &LightCommand) {
        self.on = true;
        if let Some(color_temp) = command.color_temp {
            self.set_color_temp(color_temp);
        }
        if let Some(brightness) = command.brightness {
            self.set_brightness(brightness);
        }
    }

    pub(crate) fn set_color_temp(&mut self, color_temp: ColorTemp) {
        if self.color_temp.is_some() {
            let stored = ColorTemp::from_mired(color_temp.mired());
            self.color_temp =
                Some(stored.clamp_to(self.spec.min_color_temp, self.spec.max_color_temp));
        }
    }

    pub(crate) fn set_brightness(&mut self, brightness: Brightness) {
        if self.brightness.is_some() {
            self.brightness = Some(brightness);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(kelvin: Option<u32>, brightness: Option<Brightness>) -> LightCommand {
        LightCommand {
            light_id: LightId::new("light.test"),
            color_temp: kelvin.map(ColorTemp::from_kelvin),
            brightness,
        }
    }

    #[test]
    fn should_start_off_at_coolest_setting() {
        let light = VirtualLight::new(VirtualLightSpec::color("light.test"));
        let observation = light.observe();
        assert!(!observation.on);
        assert_eq!(observation.color_temp, Some(ColorTemp::from_kelvin(6535)));
        assert_eq!(observation.brightness, Some(254));
    }

    #[test]
    fn should_store_color_temp_at_mired_resolution() {
        let mut light = VirtualLight::new(VirtualLightSpec::color("light.test"));
        light.apply(&command(Some(4375), None));
        // 1_000_000 / 4375 = 228 mired -> 4385K
        assert_eq!(light.observe().color_temp, Some(ColorTemp::from_kelvin(4385)));
        assert!(light.observe().on);
    }

    #[test]
    fn should_clamp_color_temp_to_range() {
        let mut light =
            VirtualLight::new(VirtualLightSpec::color("light.test").range(2700, 6500));
        light.apply(&command(Some(1800), None));
        assert_eq!(light.observe().color_temp, Some(ColorTemp::from_kelvin(2700)));
    }

    #[test]
    fn should_ignore_attributes_light_cannot_honour() {
        let mut light = VirtualLight::new(VirtualLightSpec::on_off("light.test"));
        light.apply(&command(Some(3000), Some(100)));
        let observation = light.observe();
        assert!(observation.on);
        assert_eq!(observation.color_temp, None);
        assert_eq!(observation.brightness, None);
    }

    #[test]
    fn should_dim_brightness_only_light() {
        let mut light = VirtualLight::new(VirtualLightSpec::dimmable("light.test"));
        light.apply(&command(Some(3000), Some(100)));
        let observation = light.observe();
        assert_eq!(observation.color_temp, None);
        assert_eq!(observation.brightness, Some(100));
    }
}
