//! Typed identifier newtypes backed by host entity strings
//! (`light.kitchen`, a device id, an area id).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a host identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Access the inner string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::EmptyId);
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

define_id!(
    /// Identifier of a light entity (e.g. `light.kitchen`).
    LightId
);

define_id!(
    /// Identifier of a device exposing one or more light entities.
    DeviceId
);

define_id!(
    /// Identifier of an area (room, floor, zone).
    AreaId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_and_trim_identifier() {
        let id: LightId = "  light.kitchen ".parse().unwrap();
        assert_eq!(id.as_str(), "light.kitchen");
    }

    #[test]
    fn should_return_error_when_parsing_empty_identifier() {
        assert_eq!(DeviceId::from_str("   "), Err(ValidationError::EmptyId));
    }

    #[test]
    fn should_display_inner_string() {
        assert_eq!(AreaId::new("living_room").to_string(), "living_room");
    }

    #[test]
    fn should_roundtrip_through_serde_json_as_plain_string() {
        let json = serde_json::to_string(&LightId::new("light.desk")).unwrap();
        assert_eq!(json, "\"light.desk\"");
        let parsed: LightId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, LightId::new("light.desk"));
    }
}
