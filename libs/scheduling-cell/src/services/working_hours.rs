// libs/scheduling-cell/src/services/working_hours.rs
use tracing::debug;

use crate::error::SchedulingError;
use crate::models::DayRule;
use crate::services::time_of_day::TimeOfDay;

/// What a day rule means for slot generation, decided once up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySchedule {
    WellFormed { start: TimeOfDay, end: TimeOfDay },
    Off,
    /// Not off, but the window is missing or invalid.
    UseDefaultTemplate,
}

pub fn parse_day_rule(rule: &DayRule) -> DaySchedule {
    if rule.off {
        return DaySchedule::Off;
    }

    match working_window(rule) {
        Ok((start, end)) => DaySchedule::WellFormed { start, end },
        Err(e) => {
            debug!("Using default slot template: {}", e);
            DaySchedule::UseDefaultTemplate
        }
    }
}

fn working_window(rule: &DayRule) -> Result<(TimeOfDay, TimeOfDay), SchedulingError> {
    let start = required_time(rule.start.as_deref(), "start")?;
    let end = required_time(rule.end.as_deref(), "end")?;

    if end <= start {
        return Err(SchedulingError::MalformedWorkingHours(format!(
            "end {} is not after start {}",
            end.to_24h(),
            start.to_24h()
        )));
    }

    Ok((start, end))
}

fn required_time(value: Option<&str>, field: &str) -> Result<TimeOfDay, SchedulingError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SchedulingError::MalformedWorkingHours(format!("missing {} time", field)))?;

    TimeOfDay::parse_24h(value).map_err(|_| {
        SchedulingError::MalformedWorkingHours(format!("{} time '{}' is not HH:MM", field, value))
    })
}
