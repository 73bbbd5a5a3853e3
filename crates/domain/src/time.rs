//! Wall-clock helpers: time-of-day parsing and the midnight-aware anchor.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Local wall-clock instant used for every schedule computation.
pub type WallClock = NaiveDateTime;

/// Return the current local wall-clock time.
#[must_use]
pub fn now() -> WallClock {
    Local::now().naive_local()
}

/// A time of day such as `23:00`, without a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Build from hour and minute.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimeOfDay`] when `hour` or `minute`
    /// is out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidTimeOfDay {
                field: "time",
                value: format!("{hour:02}:{minute:02}"),
            })
    }

    /// Parse `HH:MM` or `HH:MM:SS`, naming `field` in the error.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimeOfDay`] when `value` matches
    /// neither format.
    pub fn parse(field: &'static str, value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map(Self)
            .map_err(|_| ValidationError::InvalidTimeOfDay {
                field,
                value: value.to_string(),
            })
    }

    /// The underlying [`NaiveTime`].
    #[must_use]
    pub fn as_naive(self) -> NaiveTime {
        self.0
    }

    /// Combine with the calendar date of `now`.
    #[must_use]
    pub fn on_day_of(self, now: WallClock) -> WallClock {
        now.date().and_time(self.0)
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse("time", s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

/// Resolve `time` into the instant it denotes relative to `now`.
///
/// `time` is placed on today's date, then moved one day back when it falls
/// after the morning anchor while `now` is still before it, or one day
/// forward when it falls before the morning anchor while `now` is past it.
/// A night boundary such as `01:00` therefore belongs to the night that
/// started on the previous calendar day until the next morning is reached.
#[must_use]
pub fn anchor(time: TimeOfDay, morning: TimeOfDay, now: WallClock) -> WallClock {
    let candidate = time.on_day_of(now);
    let morning = morning.on_day_of(now);

    if candidate > morning && now < morning {
        candidate - TimeDelta::days(1)
    } else if candidate < morning && now > morning {
        candidate + TimeDelta::days(1)
    } else {
        candidate
    }
}
