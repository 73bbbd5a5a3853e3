//! Engine settings: schedule anchors and level endpoints, validated once at
//! setup so nothing at tick time can fail on configuration.

use serde::{Deserialize, Serialize};

use crate::error::{SunsetError, ValidationError};
use crate::light::{Brightness, ColorTemp, DAY_BRIGHTNESS};
use crate::time::TimeOfDay;

/// Literal accepted for `bed_time` to disable brightness automation.
pub const BED_TIME_DISABLED: &str = "null";

/// Time-of-day anchors of the daily cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub evening: TimeOfDay,
    pub night: TimeOfDay,
    pub morning: TimeOfDay,
    /// `None` disables brightness automation permanently.
    pub bed: Option<TimeOfDay>,
}

/// Color temperature endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorLevels {
    pub day: ColorTemp,
    pub night: ColorTemp,
}

/// Brightness endpoints. `day` is fixed at [`DAY_BRIGHTNESS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrightnessLevels {
    pub day: Brightness,
    pub night: Brightness,
}

/// Validated engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub schedule: Schedule,
    pub color: ColorLevels,
    pub brightness: BrightnessLevels,
}

impl Settings {
    /// Create a builder pre-filled with the defaults.
    #[must_use]
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroLengthEvening`] when evening and night
    /// coincide, or a color/brightness error for non-positive levels.
    pub fn validate(&self) -> Result<(), SunsetError> {
        if self.schedule.evening == self.schedule.night {
            return Err(ValidationError::ZeroLengthEvening.into());
        }
        for (field, level) in [
            ("day_color_temp", self.color.day),
            ("night_color_temp", self.color.night),
        ] {
            if level.kelvin() == 0 {
                return Err(ValidationError::InvalidColorTemp { field, value: 0 }.into());
            }
        }
        if self.brightness.night == 0 {
            return Err(ValidationError::InvalidBrightness {
                field: "night_brightness",
                value: 0,
            }
            .into());
        }
        Ok(())
    }
}

/// Builder accepting raw configuration values; parsing and validation happen
/// in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct SettingsBuilder {
    evening_time: String,
    night_time: String,
    morning_time: String,
    bed_time: String,
    day_color_temp: i64,
    night_color_temp: i64,
    night_brightness: i64,
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self {
            evening_time: "17:00".to_string(),
            night_time: "23:00".to_string(),
            morning_time: "06:00".to_string(),
            bed_time: "00:00".to_string(),
            day_color_temp: 6250,
            night_color_temp: 2500,
            night_brightness: 127,
        }
    }
}

impl SettingsBuilder {
    #[must_use]
    pub fn evening_time(mut self, value: impl Into<String>) -> Self {
        self.evening_time = value.into();
        self
    }

    #[must_use]
    pub fn night_time(mut self, value: impl Into<String>) -> Self {
        self.night_time = value.into();
        self
    }

    #[must_use]
    pub fn morning_time(mut self, value: impl Into<String>) -> Self {
        self.morning_time = value.into();
        self
    }

    /// Set the bed time; [`BED_TIME_DISABLED`] turns brightness automation off.
    #[must_use]
    pub fn bed_time(mut self, value: impl Into<String>) -> Self {
        self.bed_time = value.into();
        self
    }

    #[must_use]
    pub fn day_color_temp(mut self, kelvin: i64) -> Self {
        self.day_color_temp = kelvin;
        self
    }

    #[must_use]
    pub fn night_color_temp(mut self, kelvin: i64) -> Self {
        self.night_color_temp = kelvin;
        self
    }

    #[must_use]
    pub fn night_brightness(mut self, brightness: i64) -> Self {
        self.night_brightness = brightness;
        self
    }

    /// Consume the builder, parse every field, validate and return [`Settings`].
    ///
    /// # Errors
    ///
    /// Returns [`SunsetError::Validation`] naming the first offending field.
    pub fn build(self) -> Result<Settings, SunsetError> {
        let bed = if self.bed_time.trim() == BED_TIME_DISABLED {
            None
        } else {
            Some(TimeOfDay::parse("bed_time", &self.bed_time)?)
        };

        let settings = Settings {
            schedule: Schedule {
                evening: TimeOfDay::parse("evening_time", &self.evening_time)?,
                night: TimeOfDay::parse("night_time", &self.night_time)?,
                morning: TimeOfDay::parse("morning_time", &self.morning_time)?,
                bed,
            },
            color: ColorLevels {
                day: color_temp("day_color_temp", self.day_color_temp)?,
                night: color_temp("night_color_temp", self.night_color_temp)?,
            },
            brightness: BrightnessLevels {
                day: DAY_BRIGHTNESS,
                night: brightness("night_brightness", self.night_brightness)?,
            },
        };
        settings.validate()?;
        Ok(settings)
    }
}

fn color_temp(field: &'static str, value: i64) -> Result<ColorTemp, ValidationError> {
    u32::try_from(value)
        .ok()
        .filter(|kelvin| *kelvin > 0)
        .map(ColorTemp::from_kelvin)
        .ok_or(ValidationError::InvalidColorTemp { field, value })
}

fn brightness(field: &'static str, value: i64) -> Result<Brightness, ValidationError> {
    Brightness::try_from(value)
        .ok()
        .filter(|level| *level > 0)
        .ok_or(ValidationError::InvalidBrightness { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_defaults() {
        let settings = Settings::builder().build().unwrap();
        assert_eq!(settings.color.day.kelvin(), 6250);
        assert_eq!(settings.color.night.kelvin(), 2500);
        assert_eq!(settings.brightness.night, 127);
        assert_eq!(settings.brightness.day, 254);
        assert_eq!(settings.schedule.bed, Some("00:00".parse().unwrap()));
    }

    #[test]
    fn should_disable_bed_time_when_null_literal_given() {
        let settings = Settings::builder().bed_time("null").build().unwrap();
        assert!(settings.schedule.bed.is_none());
    }

    #[test]
    fn should_reject_unparseable_time() {
        let result = Settings::builder().morning_time("7 am").build();
        assert!(matches!(
            result,
            Err(SunsetError::Validation(ValidationError::InvalidTimeOfDay {
                field: "morning_time",
                ..
            }))
        ));
    }

    #[test]
    fn should_reject_zero_length_evening() {
        let result = Settings::builder()
            .evening_time("22:00")
            .night_time("22:00:00")
            .build();
        assert!(matches!(
            result,
            Err(SunsetError::Validation(ValidationError::ZeroLengthEvening))
        ));
    }

    #[test]
    fn should_reject_non_positive_color_temp() {
        let result = Settings::builder().night_color_temp(-1).build();
        assert!(matches!(
            result,
            Err(SunsetError::Validation(ValidationError::InvalidColorTemp {
                field: "night_color_temp",
                value: -1,
            }))
        ));
    }

    #[test]
    fn should_reject_brightness_out_of_range() {
        for value in [0, 256, -3] {
            let result = Settings::builder().night_brightness(value).build();
            assert!(result.is_err(), "night_brightness = {value}");
        }
    }

    #[test]
    fn should_accept_custom_levels() {
        let settings = Settings::builder()
            .day_color_temp(5000)
            .night_color_temp(2571)
            .night_brightness(192)
            .build()
            .unwrap();
        assert_eq!(settings.color.day.kelvin(), 5000);
        assert_eq!(settings.color.night.kelvin(), 2571);
        assert_eq!(settings.brightness.night, 192);
    }
}
