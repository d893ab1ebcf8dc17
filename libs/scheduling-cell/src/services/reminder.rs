// libs/scheduling-cell/src/services/reminder.rs
use chrono::{Duration, NaiveDateTime};

use crate::models::Appointment;

pub const REMINDER_WINDOW_MINUTES: i64 = 120;

/// True only when the appointment is strictly in the future and at most
/// two hours away. Recomputed on every call.
pub fn is_reminder_eligible(appointment_date: NaiveDateTime, now: NaiveDateTime) -> bool {
    let lead = appointment_date - now;
    lead > Duration::zero() && lead <= Duration::minutes(REMINDER_WINDOW_MINUTES)
}

/// Cancelled and completed appointments never get reminders.
pub fn can_offer_reminder(appointment: &Appointment, now: NaiveDateTime) -> bool {
    appointment.status.is_upcoming() && is_reminder_eligible(appointment.date, now)
}
