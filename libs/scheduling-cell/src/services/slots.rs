// libs/scheduling-cell/src/services/slots.rs
use chrono::NaiveDate;
use tracing::debug;

use crate::models::{TimeSlot, WorkingHours};
use crate::services::time_of_day::TimeOfDay;
use crate::services::working_hours::{parse_day_rule, DaySchedule};

pub const SLOT_MINUTES: u16 = 30;

const DEFAULT_TEMPLATE_START: u16 = 9 * 60;
const DEFAULT_TEMPLATE_END: u16 = 18 * 60;
const DEFAULT_TEMPLATE_BLOCKED: u16 = 12 * 60;

/// Bookable slots for `date`.
///
/// No working hours at all, or an off day, yields no slots. A day that is
/// open but misconfigured yields the default template instead of an error.
pub fn generate_slots(date: NaiveDate, working_hours: Option<&WorkingHours>) -> Vec<TimeSlot> {
    let Some(working_hours) = working_hours else {
        debug!("No working hours supplied for {}, no slots", date);
        return Vec::new();
    };

    slots_for_schedule(&parse_day_rule(working_hours.day_rule_for(date)))
}

pub fn slots_for_schedule(schedule: &DaySchedule) -> Vec<TimeSlot> {
    match *schedule {
        DaySchedule::Off => Vec::new(),
        DaySchedule::UseDefaultTemplate => default_template(),
        DaySchedule::WellFormed { start, end } => {
            let slots = walk_window(start, end);
            if slots.is_empty() {
                debug!(
                    "Window {}-{} is shorter than one slot, using default template",
                    start.to_24h(),
                    end.to_24h()
                );
                return default_template();
            }
            slots
        }
    }
}

/// 09:00 through 17:30, with the 12:00 PM slot blocked.
pub fn default_template() -> Vec<TimeSlot> {
    (DEFAULT_TEMPLATE_START..DEFAULT_TEMPLATE_END)
        .step_by(SLOT_MINUTES as usize)
        .filter_map(TimeOfDay::from_minutes)
        .map(|start| TimeSlot::new(start, start.minutes() != DEFAULT_TEMPLATE_BLOCKED))
        .collect()
}

fn walk_window(start: TimeOfDay, end: TimeOfDay) -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    let mut current = start;

    while let Some(slot_end) = current.checked_add_minutes(SLOT_MINUTES) {
        if slot_end > end {
            break;
        }
        slots.push(TimeSlot::new(current, true));
        current = slot_end;
    }

    slots
}

/// Marks every slot starting at one of `taken` as unavailable.
pub fn mark_unavailable(slots: &mut [TimeSlot], taken: &[TimeOfDay]) {
    for slot in slots.iter_mut() {
        if taken.iter().any(|t| t.minutes() == slot.start_minutes) {
            slot.available = false;
        }
    }
}
