//! Light-side value objects: capabilities, color temperature, observations
//! and the combined command the engine issues.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::LightId;

/// Brightness on the host's `0..=255` scale.
pub type Brightness = u8;

/// Brightness commanded during the day.
pub const DAY_BRIGHTNESS: Brightness = 254;

/// A color mode a light advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ColorTemp,
    Brightness,
    OnOff,
}

/// Color temperature in Kelvin.
///
/// Bulbs store the value in mireds, so two Kelvin values are treated as the
/// same setting when they map to the same mired (see [`Self::same_setting`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTemp(u32);

impl ColorTemp {
    #[must_use]
    pub const fn from_kelvin(kelvin: u32) -> Self {
        Self(kelvin)
    }

    /// Convert a mired value back to Kelvin (truncating).
    #[must_use]
    pub fn from_mired(mired: u32) -> Self {
        Self(1_000_000_u32.checked_div(mired).unwrap_or(u32::MAX))
    }

    #[must_use]
    pub const fn kelvin(self) -> u32 {
        self.0
    }

    /// `1_000_000 / kelvin`, truncated.
    #[must_use]
    pub fn mired(self) -> u32 {
        1_000_000_u32.checked_div(self.0).unwrap_or(u32::MAX)
    }

    /// Whether both values land on the same mired step.
    #[must_use]
    pub fn same_setting(self, other: Self) -> bool {
        self.mired() == other.mired()
    }

    /// Clamp into `[min, max]`; `max` wins when the range is inverted.
    #[must_use]
    pub fn clamp_to(self, min: Self, max: Self) -> Self {
        Self(self.0.max(min.0).min(max.0))
    }
}

impl fmt::Display for ColorTemp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K", self.0)
    }
}

/// Compare two optional color temperatures at mired resolution.
#[must_use]
pub fn same_color_temp(a: Option<ColorTemp>, b: Option<ColorTemp>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.same_setting(b),
        (None, None) => true,
        _ => false,
    }
}

/// Live attributes of a light, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightObservation {
    pub on: bool,
    pub color_temp: Option<ColorTemp>,
    pub brightness: Option<Brightness>,
    pub min_color_temp: ColorTemp,
    pub max_color_temp: ColorTemp,
    pub supported: BTreeSet<Capability>,
}

impl LightObservation {
    /// Create a builder for constructing a [`LightObservation`].
    #[must_use]
    pub fn builder() -> LightObservationBuilder {
        LightObservationBuilder::default()
    }

    /// The light can be set to a color temperature.
    #[must_use]
    pub fn supports_color_temp(&self) -> bool {
        self.supported.contains(&Capability::ColorTemp)
    }

    /// The light can be dimmed. Color-temperature lights are always dimmable.
    #[must_use]
    pub fn supports_brightness(&self) -> bool {
        self.supported.contains(&Capability::Brightness) || self.supports_color_temp()
    }
}

/// Step-by-step builder for [`LightObservation`].
#[derive(Debug)]
pub struct LightObservationBuilder {
    on: bool,
    color_temp: Option<ColorTemp>,
    brightness: Option<Brightness>,
    min_color_temp: ColorTemp,
    max_color_temp: ColorTemp,
    supported: BTreeSet<Capability>,
}

impl Default for LightObservationBuilder {
    fn default() -> Self {
        Self {
            on: true,
            color_temp: None,
            brightness: None,
            min_color_temp: ColorTemp::from_kelvin(2000),
            max_color_temp: ColorTemp::from_kelvin(6535),
            supported: BTreeSet::new(),
        }
    }
}

impl LightObservationBuilder {
    #[must_use]
    pub fn on(mut self, on: bool) -> Self {
        self.on = on;
        self
    }

    #[must_use]
    pub fn color_temp(mut self, kelvin: u32) -> Self {
        self.color_temp = Some(ColorTemp::from_kelvin(kelvin));
        self
    }

    #[must_use]
    pub fn brightness(mut self, brightness: Brightness) -> Self {
        self.brightness = Some(brightness);
        self
    }

    #[must_use]
    pub fn range(mut self, min_kelvin: u32, max_kelvin: u32) -> Self {
        self.min_color_temp = ColorTemp::from_kelvin(min_kelvin);
        self.max_color_temp = ColorTemp::from_kelvin(max_kelvin);
        self
    }

    #[must_use]
    pub fn capability(mut self, capability: Capability) -> Self {
        self.supported.insert(capability);
        self
    }

    #[must_use]
    pub fn build(self) -> LightObservation {
        LightObservation {
            on: self.on,
            color_temp: self.color_temp,
            brightness: self.brightness,
            min_color_temp: self.min_color_temp,
            max_color_temp: self.max_color_temp,
            supported: self.supported,
        }
    }
}

/// One combined `turn_on` call for a single light.
///
/// Carries the light's current values for dimensions the engine is not
/// changing so a partial update never clobbers the other attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightCommand {
    #[serde(rename = "entity_id")]
    pub light_id: LightId,
    #[serde(rename = "color_temp_kelvin", skip_serializing_if = "Option::is_none")]
    pub color_temp: Option<ColorTemp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<Brightness>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_kelvin_to_mired_by_truncation() {
        assert_eq!(ColorTemp::from_kelvin(4375).mired(), 228);
        assert_eq!(ColorTemp::from_kelvin(2500).mired(), 400);
    }

    #[test]
    fn should_treat_values_on_same_mired_as_same_setting() {
        // 4375K is stored as 228 mired and reported back as 4385K.
        let commanded = ColorTemp::from_kelvin(4375);
        let reported = ColorTemp::from_mired(commanded.mired());
        assert_eq!(reported.kelvin(), 4385);
        assert!(commanded.same_setting(reported));
        assert!(!commanded.same_setting(ColorTemp::from_kelvin(4000)));
    }

    #[test]
    fn should_not_divide_by_zero_for_zero_kelvin() {
        assert_eq!(ColorTemp::from_kelvin(0).mired(), u32::MAX);
    }

    #[test]
    fn should_clamp_into_range() {
        let min = ColorTemp::from_kelvin(2202);
        let max = ColorTemp::from_kelvin(6535);
        assert_eq!(ColorTemp::from_kelvin(1800).clamp_to(min, max), min);
        assert_eq!(ColorTemp::from_kelvin(9000).clamp_to(min, max), max);
        assert_eq!(
            ColorTemp::from_kelvin(4375).clamp_to(min, max),
            ColorTemp::from_kelvin(4375)
        );
    }

    #[test]
    fn should_compare_optional_color_temps() {
        let a = Some(ColorTemp::from_kelvin(4375));
        let b = Some(ColorTemp::from_kelvin(4385));
        assert!(same_color_temp(a, b));
        assert!(same_color_temp(None, None));
        assert!(!same_color_temp(a, None));
    }

    #[test]
    fn should_treat_color_temp_lights_as_dimmable() {
        let light = LightObservation::builder()
            .capability(Capability::ColorTemp)
            .build();
        assert!(light.supports_color_temp());
        assert!(light.supports_brightness());
    }

    #[test]
    fn should_report_no_capabilities_for_on_off_light() {
        let light = LightObservation::builder()
            .capability(Capability::OnOff)
            .build();
        assert!(!light.supports_color_temp());
        assert!(!light.supports_brightness());
    }

    #[test]
    fn should_serialize_command_without_missing_attributes() {
        let command = LightCommand {
            light_id: LightId::new("light.bw"),
            color_temp: None,
            brightness: Some(127),
        };
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"entity_id": "light.bw", "brightness": 127})
        );
    }
}
