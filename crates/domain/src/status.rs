//! Status: the global targets published after every pass.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::light::{Brightness, ColorTemp};

/// Effective brightness target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetBrightness {
    Level(Brightness),
    /// No bed time configured.
    Disabled,
}

impl fmt::Display for TargetBrightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(level) => write!(f, "{level}"),
            Self::Disabled => f.write_str("disabled"),
        }
    }
}

/// Published engine status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub color_active: bool,
    pub brightness_active: bool,
    /// Manual pin if set, else the calculator output; not clamped to any light.
    pub color_temp: ColorTemp,
    pub brightness: TargetBrightness,
}
