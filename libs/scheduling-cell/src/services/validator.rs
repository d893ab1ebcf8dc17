// libs/scheduling-cell/src/services/validator.rs
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::error::SchedulingError;
use crate::models::{weekday_name, WorkingHours};
use crate::services::slots::slots_for_schedule;
use crate::services::time_of_day::TimeOfDay;
use crate::services::working_hours::{parse_day_rule, DaySchedule};

/// Checks a candidate (date, time) against the clinic's hours and `now`,
/// returning the clinic-local timestamp it resolves to.
///
/// Rules run in order and stop at the first failure:
/// 1. `date` is not before today
/// 2. the clinic is not off that day (only when hours are supplied)
/// 3. `time` is one of the slots [`generate_slots`](crate::services::slots::generate_slots)
///    would offer; misconfigured hours fall back to the default template and
///    missing hours offer nothing
/// 4. the resolved timestamp is not before `now`
pub fn validate_candidate(
    date: NaiveDate,
    time: &str,
    working_hours: Option<&WorkingHours>,
    now: NaiveDateTime,
) -> Result<NaiveDateTime, SchedulingError> {
    debug!("Validating candidate {} {}", date, time);

    if date < now.date() {
        return Err(SchedulingError::PastDate { date });
    }

    let slots = match working_hours {
        Some(hours) => {
            let schedule = parse_day_rule(hours.day_rule_for(date));
            if schedule == DaySchedule::Off {
                return Err(SchedulingError::ClinicClosed {
                    weekday: weekday_name(date).to_string(),
                });
            }
            slots_for_schedule(&schedule)
        }
        None => {
            debug!("No working hours supplied for {}, nothing is bookable", date);
            Vec::new()
        }
    };

    let requested: TimeOfDay = time.parse()?;

    let on_grid = slots
        .iter()
        .any(|slot| slot.available && slot.start_minutes == requested.minutes());

    if !on_grid {
        return Err(SchedulingError::OutsideWorkingHours { time: requested.label() });
    }

    let timestamp = date.and_time(requested.to_naive_time());
    if timestamp < now {
        warn!("Rejected stale slot {} (now {})", timestamp, now);
        return Err(SchedulingError::PastTime { requested: timestamp });
    }

    Ok(timestamp)
}

pub fn is_bookable(
    date: NaiveDate,
    time: &str,
    working_hours: Option<&WorkingHours>,
    now: NaiveDateTime,
) -> bool {
    validate_candidate(date, time, working_hours, now).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayRule;
    use assert_matches::assert_matches;

    // 2026-10-19 is a Monday.
    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        date(day).and_hms_opt(hour, minute, 0).unwrap()
    }

    fn clinic_hours() -> WorkingHours {
        let mut hours = WorkingHours::uniform(DayRule::open("09:00", "17:00"));
        hours.friday = DayRule::closed();
        hours
    }

    #[test]
    fn test_accepts_future_slot_in_both_notations() {
        let hours = clinic_hours();
        let now = at(18, 8, 0);

        assert_eq!(validate_candidate(date(19), "10:30 AM", Some(&hours), now), Ok(at(19, 10, 30)));
        assert_eq!(validate_candidate(date(19), "14:00", Some(&hours), now), Ok(at(19, 14, 0)));
    }

    #[test]
    fn test_past_date_checked_first() {
        // Friday is closed, but the past date wins.
        let result = validate_candidate(date(16), "garbage", Some(&clinic_hours()), at(18, 8, 0));
        assert_eq!(result, Err(SchedulingError::PastDate { date: date(16) }));
    }

    #[test]
    fn test_closed_day() {
        let result = validate_candidate(date(23), "10:00 AM", Some(&clinic_hours()), at(18, 8, 0));
        assert_eq!(result, Err(SchedulingError::ClinicClosed { weekday: "friday".to_string() }));
    }

    #[test]
    fn test_outside_window_and_off_grid() {
        let hours = clinic_hours();
        let now = at(18, 8, 0);

        assert_matches!(
            validate_candidate(date(19), "08:30 AM", Some(&hours), now),
            Err(SchedulingError::OutsideWorkingHours { .. })
        );
        assert_matches!(
            validate_candidate(date(19), "05:00 PM", Some(&hours), now),
            Err(SchedulingError::OutsideWorkingHours { .. })
        );
        assert_matches!(
            validate_candidate(date(19), "10:15 AM", Some(&hours), now),
            Err(SchedulingError::OutsideWorkingHours { .. })
        );
    }

    #[test]
    fn test_unparseable_time() {
        assert_eq!(
            validate_candidate(date(19), "quarter past", Some(&clinic_hours()), at(18, 8, 0)),
            Err(SchedulingError::InvalidTimeFormat("quarter past".to_string()))
        );
    }

    #[test]
    fn test_same_day_earlier_time_is_past() {
        let now = at(19, 11, 10);
        assert_eq!(
            validate_candidate(date(19), "11:00 AM", Some(&clinic_hours()), now),
            Err(SchedulingError::PastTime { requested: at(19, 11, 0) })
        );
        assert!(is_bookable(date(19), "11:30 AM", Some(&clinic_hours()), now));
    }

    #[test]
    fn test_slot_starting_exactly_now_is_bookable() {
        assert!(is_bookable(date(19), "11:00 AM", Some(&clinic_hours()), at(19, 11, 0)));
    }

    #[test]
    fn test_malformed_hours_accept_template_slots_only() {
        let hours = WorkingHours::uniform(DayRule::open("18:00", "09:00"));
        let now = at(18, 8, 0);

        assert!(is_bookable(date(19), "09:00 AM", Some(&hours), now));
        assert!(is_bookable(date(19), "05:30 PM", Some(&hours), now));
        assert!(!is_bookable(date(19), "12:00 PM", Some(&hours), now));
        assert!(!is_bookable(date(19), "06:00 PM", Some(&hours), now));
    }

    #[test]
    fn test_missing_hours_accept_nothing() {
        let now = at(18, 8, 0);
        assert_eq!(
            validate_candidate(date(23), "09:30 AM", None, now),
            Err(SchedulingError::OutsideWorkingHours { time: "09:30 AM".to_string() })
        );
        assert_eq!(
            validate_candidate(date(19), "nine", None, now),
            Err(SchedulingError::InvalidTimeFormat("nine".to_string()))
        );
    }
}
