// libs/scheduling-cell/src/services/time_of_day.rs
//
// Single conversion point between minutes-since-midnight and the 12-hour
// labels shown in the booking UI. Slot generation, candidate validation and
// appointment display all go through here.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SchedulingError;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

static TWENTY_FOUR_HOUR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").expect("24-hour pattern is valid")
});

static TWELVE_HOUR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0?[1-9]|1[0-2]):([0-5]\d)\s*([AaPp][Mm])$").expect("12-hour pattern is valid")
});

/// Clinic-local wall-clock time with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self((hour * 60 + minute) as u16))
    }

    /// Seconds are dropped.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    /// Strict `HH:MM`, hours 00-23, minutes 00-59.
    pub fn parse_24h(value: &str) -> Result<Self, SchedulingError> {
        let captures = TWENTY_FOUR_HOUR
            .captures(value.trim())
            .ok_or_else(|| SchedulingError::InvalidTimeFormat(value.to_string()))?;

        let hour: u32 = captures[1].parse().map_err(|_| SchedulingError::InvalidTimeFormat(value.to_string()))?;
        let minute: u32 = captures[2].parse().map_err(|_| SchedulingError::InvalidTimeFormat(value.to_string()))?;

        Self::from_hm(hour, minute).ok_or_else(|| SchedulingError::InvalidTimeFormat(value.to_string()))
    }

    /// `hh:mm AM|PM`. 12 PM stays noon, 12 AM becomes midnight.
    pub fn parse_12h(value: &str) -> Result<Self, SchedulingError> {
        let captures = TWELVE_HOUR
            .captures(value.trim())
            .ok_or_else(|| SchedulingError::InvalidTimeFormat(value.to_string()))?;

        let hour: u32 = captures[1].parse().map_err(|_| SchedulingError::InvalidTimeFormat(value.to_string()))?;
        let minute: u32 = captures[2].parse().map_err(|_| SchedulingError::InvalidTimeFormat(value.to_string()))?;
        let is_pm = captures[3].eq_ignore_ascii_case("pm");

        let hour = match (hour, is_pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };

        Self::from_hm(hour, minute).ok_or_else(|| SchedulingError::InvalidTimeFormat(value.to_string()))
    }

    pub fn minutes(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u32 {
        u32::from(self.0 / 60)
    }

    pub fn minute(&self) -> u32 {
        u32::from(self.0 % 60)
    }

    /// `None` when the result would run past midnight.
    pub fn checked_add_minutes(&self, minutes: u16) -> Option<Self> {
        self.0.checked_add(minutes).and_then(Self::from_minutes)
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN)
    }

    /// 12-hour label, e.g. "09:30 AM", "12:00 PM".
    pub fn label(&self) -> String {
        let hour = self.hour();
        let suffix = if hour < 12 { "AM" } else { "PM" };
        let display_hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{:02}:{:02} {}", display_hour, self.minute(), suffix)
    }

    /// 24-hour `HH:MM`, the format working hours are declared in.
    pub fn to_24h(&self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Accepts either a slot label or a 24-hour pair.
impl FromStr for TimeOfDay {
    type Err = SchedulingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse_12h(value).or_else(|_| Self::parse_24h(value))
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.label()
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = SchedulingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Table display form, e.g. "2026-10-19 01:30 PM".
pub fn format_appointment_time(date: NaiveDateTime) -> String {
    format!(
        "{} {}",
        date.date().format("%Y-%m-%d"),
        TimeOfDay::from_naive_time(date.time()).label()
    )
}
