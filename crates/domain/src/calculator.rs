//! Time-of-day calculators.
//!
//! [`DaytimeCalculator`] answers "is it night" for a night/morning pair and
//! drives the brightness dimension (built with the bed time as its night
//! anchor). [`RedshiftCalculator`] adds an evening anchor and ramps the color
//! temperature linearly from the day level to the night level.

use crate::light::{Brightness, ColorTemp};
use crate::settings::{BrightnessLevels, ColorLevels, Settings};
use crate::time::{TimeOfDay, WallClock, anchor};

/// Two-anchor night test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaytimeCalculator {
    night: TimeOfDay,
    morning: TimeOfDay,
}

impl DaytimeCalculator {
    #[must_use]
    pub fn new(night: TimeOfDay, morning: TimeOfDay) -> Self {
        Self { night, morning }
    }

    /// Start of the night `now` belongs to (or the next one).
    #[must_use]
    pub fn night_start(&self, now: WallClock) -> WallClock {
        anchor(self.night, self.morning, now)
    }

    #[must_use]
    pub fn is_night(&self, now: WallClock) -> bool {
        now > self.night_start(now)
    }
}

/// Color temperature over the day/evening/night cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedshiftCalculator {
    daytime: DaytimeCalculator,
    evening: TimeOfDay,
    levels: ColorLevels,
}

impl RedshiftCalculator {
    #[must_use]
    pub fn new(
        evening: TimeOfDay,
        night: TimeOfDay,
        morning: TimeOfDay,
        levels: ColorLevels,
    ) -> Self {
        Self {
            daytime: DaytimeCalculator::new(night, morning),
            evening,
            levels,
        }
    }

    /// Build from validated settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let schedule = settings.schedule;
        Self::new(
            schedule.evening,
            schedule.night,
            schedule.morning,
            settings.color,
        )
    }

    #[must_use]
    pub fn evening_start(&self, now: WallClock) -> WallClock {
        anchor(self.evening, self.daytime.morning, now)
    }

    #[must_use]
    pub fn is_day(&self, now: WallClock) -> bool {
        now < self.evening_start(now)
    }

    #[must_use]
    pub fn is_night(&self, now: WallClock) -> bool {
        self.daytime.is_night(now)
    }

    /// Target color temperature at `now`, unclamped.
    #[must_use]
    pub fn color_temp(&self, now: WallClock) -> ColorTemp {
        if self.is_night(now) {
            return self.levels.night;
        }
        if self.is_day(now) {
            return self.levels.day;
        }
        self.interpolated(now)
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn interpolated(&self, now: WallClock) -> ColorTemp {
        let evening = self.evening_start(now);
        let span = (self.daytime.night_start(now) - evening).num_seconds();
        if span <= 0 {
            return self.levels.night;
        }
        let elapsed = (now - evening).num_seconds();

        let day = f64::from(self.levels.day.kelvin());
        let night = f64::from(self.levels.night.kelvin());
        let value = day + (night - day) * elapsed as f64 / span as f64;

        // Bounded by the two levels, both u32.
        ColorTemp::from_kelvin(value.round_ties_even() as u32)
    }
}

/// Day/night brightness, absent when no bed time is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessCalculator {
    daytime: DaytimeCalculator,
    levels: BrightnessLevels,
}

impl BrightnessCalculator {
    /// `None` when the schedule has no bed time.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        let schedule = settings.schedule;
        schedule.bed.map(|bed| Self {
            daytime: DaytimeCalculator::new(bed, schedule.morning),
            levels: settings.brightness,
        })
    }

    #[must_use]
    pub fn brightness(&self, now: WallClock) -> Brightness {
        if self.daytime.is_night(now) {
            self.levels.night
        } else {
            self.levels.day
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(s: &str) -> WallClock {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn tod(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn redshift(
        evening: &str,
        night: &str,
        morning: &str,
        day_level: u32,
        night_level: u32,
    ) -> RedshiftCalculator {
        RedshiftCalculator::new(
            tod(evening),
            tod(night),
            tod(morning),
            ColorLevels {
                day: ColorTemp::from_kelvin(day_level),
                night: ColorTemp::from_kelvin(night_level),
            },
        )
    }

    #[test]
    fn should_detect_night_for_23_to_06() {
        let calculator = DaytimeCalculator::new(tod("23:00"), tod("06:00"));
        for (now, expected) in [
            ("12:00", false),
            ("23:30", true),
            ("02:00", true),
            ("07:00", false),
        ] {
            let now_at = at(&format!("2021-11-07 {now}:00"));
            assert_eq!(calculator.is_night(now_at), expected, "at {now}");
        }
    }

    #[test]
    fn should_detect_night_for_01_to_06() {
        let calculator = DaytimeCalculator::new(tod("01:00"), tod("06:00"));
        for (now, expected) in [
            ("12:00", false),
            ("23:30", false),
            ("00:30", false),
            ("02:00", true),
            ("07:00", false),
        ] {
            let now_at = at(&format!("2021-11-07 {now}:00"));
            assert_eq!(calculator.is_night(now_at), expected, "at {now}");
        }
    }

    #[test]
    fn should_move_night_boundary_with_morning_anchor() {
        let now = at("2021-11-07 06:30:00");
        for (morning, expected) in [
            ("05:00", false),
            ("06:00", false),
            ("07:00", true),
            ("08:00", true),
        ] {
            let calculator = DaytimeCalculator::new(tod("23:00"), tod(morning));
            assert_eq!(calculator.is_night(now), expected, "morning {morning}");
        }
    }

    #[test]
    fn should_return_day_level_during_day() {
        for day in [6000, 6250] {
            let calculator = redshift("17:00", "23:00", "07:00", day, 2000);
            assert_eq!(calculator.color_temp(at("2020-12-13 14:00:00")).kelvin(), day);
        }
    }

    #[test]
    fn should_return_night_level_during_night() {
        for night in [2000, 2500] {
            let calculator = redshift("17:00", "23:00", "07:00", 6000, night);
            assert_eq!(
                calculator.color_temp(at("2020-12-13 23:30:00")).kelvin(),
                night
            );
        }
    }

    #[test]
    fn should_return_night_level_after_midnight() {
        let calculator = redshift("17:00", "23:00", "07:00", 6250, 2500);
        assert_eq!(calculator.color_temp(at("2020-12-13 01:30:00")).kelvin(), 2500);

        let late_night = redshift("17:00", "01:00", "07:00", 6000, 2500);
        assert_eq!(late_night.color_temp(at("2020-12-13 01:30:00")).kelvin(), 2500);
    }

    #[test]
    fn should_interpolate_during_evening() {
        let calculator = redshift("17:00", "23:00", "07:00", 6000, 3000);
        for (now, expected) in [
            ("17:00", 6000),
            ("19:00", 5000),
            ("20:00", 4500),
            ("21:00", 4000),
            ("23:00", 3000),
        ] {
            let now_at = at(&format!("2020-12-13 {now}:00"));
            assert_eq!(calculator.color_temp(now_at).kelvin(), expected, "at {now}");
        }
    }

    #[test]
    fn should_hit_midpoint_with_default_levels() {
        let calculator = redshift("17:00", "23:00", "06:00", 6250, 2500);
        assert_eq!(calculator.color_temp(at("2020-12-13 20:00:00")).kelvin(), 4375);
    }

    #[test]
    fn should_interpolate_across_midnight() {
        for (evening, night, now) in [
            ("23:00", "01:00", "00:00"),
            ("21:00", "01:00", "23:00"),
            ("23:00", "03:00", "01:00"),
        ] {
            let calculator = redshift(evening, night, "07:00", 6000, 2500);
            let now_at = at(&format!("2020-12-13 {now}:00"));
            assert_eq!(
                calculator.color_temp(now_at).kelvin(),
                4250,
                "{evening}-{night} at {now}"
            );
        }
    }

    #[test]
    fn should_decrease_monotonically_through_evening() {
        let calculator = redshift("17:00", "23:00", "06:00", 6250, 2500);
        let start = at("2020-12-13 17:00:00");
        let mut previous = calculator.color_temp(start).kelvin();
        assert_eq!(previous, 6250);
        for minutes in (1..=360).step_by(7) {
            let now = start + chrono::TimeDelta::minutes(minutes);
            let current = calculator.color_temp(now).kelvin();
            assert!(current <= previous, "not monotonic at +{minutes}min");
            previous = current;
        }
        assert_eq!(calculator.color_temp(at("2020-12-13 23:00:00")).kelvin(), 2500);
    }

    #[test]
    fn should_round_half_to_even() {
        // Midpoint of 3 -> 2 is 2.5.
        let calculator = redshift("17:00", "17:00:02", "06:00", 3, 2);
        assert_eq!(calculator.color_temp(at("2020-12-13 17:00:01")).kelvin(), 2);
    }

    #[test]
    fn should_dim_after_bed_time() {
        let settings = Settings::builder().bed_time("00:00").build().unwrap();
        let calculator = BrightnessCalculator::from_settings(&settings).unwrap();
        assert_eq!(calculator.brightness(at("2020-12-13 14:00:00")), 254);
        assert_eq!(calculator.brightness(at("2020-12-14 04:00:00")), 127);
    }

    #[test]
    fn should_have_no_brightness_calculator_without_bed_time() {
        let settings = Settings::builder().bed_time("null").build().unwrap();
        assert!(BrightnessCalculator::from_settings(&settings).is_none());
    }
}
