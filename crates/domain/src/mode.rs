//! Mode controller: the two automation flags and their manual pins.

use serde::{Deserialize, Serialize};

use crate::light::{Brightness, ColorTemp};

/// Which dimensions are automated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeFlags {
    pub color_active: bool,
    pub brightness_active: bool,
}

impl Default for ModeFlags {
    fn default() -> Self {
        Self {
            color_active: true,
            brightness_active: true,
        }
    }
}

/// Values pinned by a deactivate command; a set field bypasses the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManualOverride {
    pub color_temp: Option<ColorTemp>,
    pub brightness: Option<Brightness>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeController {
    flags: ModeFlags,
    manual: ManualOverride,
}

impl ModeController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn flags(&self) -> ModeFlags {
        self.flags
    }

    #[must_use]
    pub fn manual(&self) -> ManualOverride {
        self.manual
    }

    pub fn activate_color(&mut self) {
        self.manual.color_temp = None;
        self.flags.color_active = true;
    }

    pub fn deactivate_color(&mut self, pinned: Option<ColorTemp>) {
        self.manual.color_temp = pinned;
        self.flags.color_active = false;
    }

    pub fn activate_brightness(&mut self) {
        self.manual.brightness = None;
        self.flags.brightness_active = true;
    }

    pub fn deactivate_brightness(&mut self, pinned: Option<Brightness>) {
        self.manual.brightness = pinned;
        self.flags.brightness_active = false;
    }
}
