// libs/scheduling-cell/tests/scheduling_properties_test.rs
use assert_matches::assert_matches;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use scheduling_cell::services::slots::{default_template, SLOT_MINUTES};
use scheduling_cell::{
    generate_slots, is_bookable, validate_candidate, DayRule, SchedulingError, TimeOfDay, WorkingHours,
};

// ==============================================================================
// TEST FIXTURES
// ==============================================================================

fn next(weekday: Weekday) -> NaiveDate {
    let mut date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
    while date.weekday() != weekday {
        date = date.succ_opt().unwrap();
    }
    date
}

fn morning_before(date: NaiveDate) -> NaiveDateTime {
    date.pred_opt().unwrap().and_hms_opt(8, 0, 0).unwrap()
}

fn quarter_hours() -> impl Iterator<Item = TimeOfDay> {
    (0..24 * 60).step_by(15).filter_map(TimeOfDay::from_minutes)
}

// ==============================================================================
// SLOT GENERATION PROPERTIES
// ==============================================================================

#[test]
fn test_well_formed_windows_produce_contained_grid() {
    let date = next(Weekday::Tue);

    for start in quarter_hours() {
        for end in quarter_hours().filter(|end| end.minutes() >= start.minutes() + SLOT_MINUTES) {
            let hours = WorkingHours::uniform(DayRule::open(&start.to_24h(), &end.to_24h()));
            let slots = generate_slots(date, Some(&hours));

            assert!(!slots.is_empty());
            assert_eq!(slots[0].start_minutes, start.minutes());
            for pair in slots.windows(2) {
                assert_eq!(pair[1].start_minutes - pair[0].start_minutes, SLOT_MINUTES);
            }
            for slot in &slots {
                assert!(slot.available);
                assert!(slot.start_minutes >= start.minutes());
                assert!(slot.start_minutes + SLOT_MINUTES <= end.minutes());
            }
        }
    }
}

#[test]
fn test_off_days_are_empty_whatever_the_window() {
    let date = next(Weekday::Wed);
    let rules = [
        DayRule::closed(),
        DayRule { off: true, ..DayRule::open("09:00", "17:00") },
        DayRule { off: true, ..DayRule::open("17:00", "09:00") },
        DayRule { off: true, ..DayRule::open("bad", "") },
    ];

    for rule in rules {
        assert!(generate_slots(date, Some(&WorkingHours::uniform(rule))).is_empty());
    }
}

#[test]
fn test_misconfigured_days_fall_back_to_template() {
    let date = next(Weekday::Thu);
    let rules = [
        DayRule::default(),
        DayRule::open("13:00", "09:00"),
        DayRule::open("09:00", "09:00"),
        DayRule::open("09:00", "09:10"),
        DayRule::open("9:00", "17:00"),
        DayRule::open("09:00", "5pm"),
        DayRule { start: None, ..DayRule::open("09:00", "17:00") },
    ];

    for rule in rules {
        let slots = generate_slots(date, Some(&WorkingHours::uniform(rule.clone())));
        assert_eq!(slots.len(), 18, "{:?}", rule);
        assert_eq!(slots, default_template());
    }
}

#[test]
fn test_generated_labels_normalize_back_to_their_minutes() {
    let hours = WorkingHours::uniform(DayRule::open("00:00", "23:59"));
    for slot in generate_slots(next(Weekday::Sun), Some(&hours)) {
        assert_eq!(TimeOfDay::parse_12h(&slot.label).unwrap().minutes(), slot.start_minutes);
    }

    assert_eq!(TimeOfDay::parse_12h("12:00 PM").unwrap().minutes(), 720);
    assert_eq!(TimeOfDay::parse_12h("12:00 AM").unwrap().minutes(), 0);
    assert_eq!(TimeOfDay::parse_12h("01:30 PM").unwrap().minutes(), 810);
}

// ==============================================================================
// BOOKABILITY PROPERTIES
// ==============================================================================

#[test]
fn test_past_calendar_days_are_never_bookable() {
    let hours = WorkingHours::uniform(DayRule::open("09:00", "17:00"));
    let now = next(Weekday::Wed).and_hms_opt(7, 0, 0).unwrap();

    for days_back in 1..=10 {
        let date = now.date() - chrono::Duration::days(days_back);
        assert_eq!(
            validate_candidate(date, "10:00 AM", Some(&hours), now),
            Err(SchedulingError::PastDate { date })
        );
    }
}

#[test]
fn test_times_outside_window_are_rejected() {
    let hours = WorkingHours::uniform(DayRule::open("09:00", "13:00"));
    let date = next(Weekday::Mon);
    let now = morning_before(date);

    for time in quarter_hours() {
        let inside = time.minutes() >= 9 * 60 && time.minutes() < 13 * 60;
        if !inside {
            assert!(!is_bookable(date, &time.label(), Some(&hours), now), "{}", time);
        }
    }
}

#[test]
fn test_earlier_today_is_rejected_later_today_accepted() {
    let hours = WorkingHours::uniform(DayRule::open("09:00", "17:00"));
    let date = next(Weekday::Tue);
    let now = date.and_hms_opt(12, 45, 0).unwrap();

    assert_matches!(
        validate_candidate(date, "12:30 PM", Some(&hours), now),
        Err(SchedulingError::PastTime { .. })
    );
    assert_matches!(
        validate_candidate(date, "09:00", Some(&hours), now),
        Err(SchedulingError::PastTime { .. })
    );
    assert!(is_bookable(date, "01:00 PM", Some(&hours), now));
}

// ==============================================================================
// SCENARIOS
// ==============================================================================

#[test]
fn test_monday_morning_clinic() {
    let hours = WorkingHours {
        monday: DayRule::open("09:00", "13:00"),
        ..Default::default()
    };

    let slots = generate_slots(next(Weekday::Mon), Some(&hours));
    let labels: Vec<&str> = slots.iter().map(|slot| slot.label.as_str()).collect();

    assert_eq!(
        labels,
        vec![
            "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM",
            "11:00 AM", "11:30 AM", "12:00 PM", "12:30 PM",
        ]
    );
    assert!(slots.iter().all(|slot| slot.available));
}

#[test]
fn test_friday_closed_clinic() {
    let hours = WorkingHours {
        friday: DayRule::closed(),
        ..WorkingHours::uniform(DayRule::open("09:00", "17:00"))
    };
    let friday = next(Weekday::Fri);
    let now = morning_before(friday);

    assert!(generate_slots(friday, Some(&hours)).is_empty());

    for time in ["09:00 AM", "12:00 PM", "04:30 PM", "10:00"] {
        assert_eq!(
            validate_candidate(friday, time, Some(&hours), now),
            Err(SchedulingError::ClinicClosed { weekday: "friday".to_string() })
        );
    }
}
