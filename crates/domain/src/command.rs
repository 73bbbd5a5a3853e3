//! Control commands: the closed set of operations the engine accepts.
//!
//! Commands travel as JSON tagged by `service`:
//!
//! ```json
//! {"service": "deactivate_color", "color_temp": 2571}
//! {"service": "dont_touch", "entity_ids": ["light.desk"], "area_id": "office"}
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::id::{AreaId, DeviceId, LightId};
use crate::light::{Brightness, ColorTemp};

/// A control operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "service", rename_all = "snake_case")]
pub enum Command {
    ActivateColor,
    DeactivateColor {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color_temp: Option<ColorTemp>,
    },
    ActivateBrightness,
    DeactivateBrightness {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        brightness: Option<Brightness>,
    },
    DontTouch(Selector),
    HandleAgain(Selector),
}

impl Command {
    /// Service name, as used on the wire.
    #[must_use]
    pub fn service(&self) -> &'static str {
        match self {
            Self::ActivateColor => "activate_color",
            Self::DeactivateColor { .. } => "deactivate_color",
            Self::ActivateBrightness => "activate_brightness",
            Self::DeactivateBrightness { .. } => "deactivate_brightness",
            Self::DontTouch(_) => "dont_touch",
            Self::HandleAgain(_) => "handle_again",
        }
    }

    /// Check payload invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidColorTemp`] for a zero pinned color
    /// temperature.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::DeactivateColor {
                color_temp: Some(color_temp),
            } if color_temp.kelvin() == 0 => Err(ValidationError::InvalidColorTemp {
                field: "color_temp",
                value: 0,
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.service())
    }
}

/// Target of `dont_touch` / `handle_again`. Every provided field is resolved
/// and the results are unioned.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selector {
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub entity_ids: Vec<LightId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<DeviceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_id: Option<AreaId>,
}

impl Selector {
    #[must_use]
    pub fn lights(ids: impl IntoIterator<Item = LightId>) -> Self {
        Self {
            entity_ids: ids.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn device(id: DeviceId) -> Self {
        Self {
            device_id: Some(id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn area(id: AreaId) -> Self {
        Self {
            area_id: Some(id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entity_ids.is_empty() && self.device_id.is_none() && self.area_id.is_none()
    }
}

/// Accept either `"light.a"` or `["light.a", "light.b"]`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<LightId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(LightId),
        Many(Vec<LightId>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(id) => vec![id],
        OneOrMany::Many(ids) => ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_activate_command() {
        let command: Command = serde_json::from_str(r#"{"service":"activate_color"}"#).unwrap();
        assert_eq!(command, Command::ActivateColor);
    }

    #[test]
    fn should_parse_pinned_deactivation() {
        let command: Command =
            serde_json::from_str(r#"{"service":"deactivate_color","color_temp":2571}"#).unwrap();
        assert_eq!(
            command,
            Command::DeactivateColor {
                color_temp: Some(ColorTemp::from_kelvin(2571))
            }
        );
    }

    #[test]
    fn should_parse_deactivation_without_pin() {
        let command: Command =
            serde_json::from_str(r#"{"service":"deactivate_brightness"}"#).unwrap();
        assert_eq!(command, Command::DeactivateBrightness { brightness: None });
    }

    #[test]
    fn should_accept_single_entity_id_string() {
        let command: Command =
            serde_json::from_str(r#"{"service":"dont_touch","entity_ids":"light.desk"}"#)
                .unwrap();
        assert_eq!(
            command,
            Command::DontTouch(Selector::lights([LightId::new("light.desk")]))
        );
    }

    #[test]
    fn should_parse_combined_selector() {
        let command: Command = serde_json::from_str(
            r#"{"service":"handle_again","entity_ids":["light.a","light.b"],"device_id":"dev1","area_id":"office"}"#,
        )
        .unwrap();
        let Command::HandleAgain(selector) = command else {
            panic!("expected handle_again");
        };
        assert_eq!(selector.entity_ids.len(), 2);
        assert_eq!(selector.device_id, Some(DeviceId::new("dev1")));
        assert_eq!(selector.area_id, Some(AreaId::new("office")));
    }

    #[test]
    fn should_reject_unknown_service() {
        let result: Result<Command, _> = serde_json::from_str(r#"{"service":"party_mode"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_zero_pinned_color_temp() {
        let command = Command::DeactivateColor {
            color_temp: Some(ColorTemp::from_kelvin(0)),
        };
        assert!(command.validate().is_err());
        assert!(Command::ActivateColor.validate().is_ok());
    }

    #[test]
    fn should_display_service_name() {
        assert_eq!(
            Command::DontTouch(Selector::default()).to_string(),
            "dont_touch"
        );
    }
}
