// libs/scheduling-cell/src/models.rs
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::services::time_of_day::TimeOfDay;

// ==============================================================================
// WORKING HOURS MODELS
// ==============================================================================

/// One weekday's open/closed flag and working window.
///
/// `start`/`end` are kept as the raw `HH:MM` strings the clinic profile
/// supplied, so a misconfigured day can still be represented and later
/// recovered by the default slot template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRule {
    #[serde(default)]
    pub off: bool,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl DayRule {
    pub fn open(start: &str, end: &str) -> Self {
        Self {
            off: false,
            start: Some(start.to_string()),
            end: Some(end.to_string()),
        }
    }

    pub fn closed() -> Self {
        Self {
            off: true,
            start: None,
            end: None,
        }
    }
}

/// A clinic's declared availability for each of the seven weekdays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    #[serde(default)]
    pub saturday: DayRule,
    #[serde(default)]
    pub sunday: DayRule,
    #[serde(default)]
    pub monday: DayRule,
    #[serde(default)]
    pub tuesday: DayRule,
    #[serde(default)]
    pub wednesday: DayRule,
    #[serde(default)]
    pub thursday: DayRule,
    #[serde(default)]
    pub friday: DayRule,
}

impl WorkingHours {
    /// Same rule on every day of the week.
    pub fn uniform(rule: DayRule) -> Self {
        Self {
            saturday: rule.clone(),
            sunday: rule.clone(),
            monday: rule.clone(),
            tuesday: rule.clone(),
            wednesday: rule.clone(),
            thursday: rule.clone(),
            friday: rule,
        }
    }

    pub fn day_rule_for(&self, date: NaiveDate) -> &DayRule {
        match date.weekday() {
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
        }
    }
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
    }
}

// ==============================================================================
// SLOT MODELS
// ==============================================================================

/// A 30-minute bookable unit. View artifact, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub label: String,
    pub start_minutes: u16,
    pub available: bool,
}

impl TimeSlot {
    pub fn new(start: TimeOfDay, available: bool) -> Self {
        Self {
            label: start.label(),
            start_minutes: start.minutes(),
            available,
        }
    }

    pub fn time_of_day(&self) -> Option<TimeOfDay> {
        TimeOfDay::from_minutes(self.start_minutes)
    }
}

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub clinic_id: Uuid,
    /// Clinic-local start of the appointment.
    pub date: NaiveDateTime,
    pub status: AppointmentStatus,
    pub source: AppointmentSource,
    pub price: Option<f64>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Appointment {
    pub fn time_label(&self) -> String {
        TimeOfDay::from_naive_time(self.date.time()).label()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Only cancelling gives a slot back.
    pub fn holds_slot(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }

    /// Still expected to happen.
    pub fn is_upcoming(&self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Who created the appointment: clinic staff or the public booking page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentSource {
    Clinic,
    Booking,
}

impl fmt::Display for AppointmentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentSource::Clinic => write!(f, "clinic"),
            AppointmentSource::Booking => write!(f, "booking"),
        }
    }
}

/// A validated candidate, resolved to its absolute timestamp, ready for storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub patient_id: Uuid,
    pub clinic_id: Uuid,
    pub date: NaiveDateTime,
    pub status: AppointmentStatus,
    pub source: AppointmentSource,
    pub price: Option<f64>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentFilter {
    pub clinic_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl AppointmentFilter {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.clinic_id.map_or(true, |id| appointment.clinic_id == id)
            && self.patient_id.map_or(true, |id| appointment.patient_id == id)
            && self.status.map_or(true, |status| appointment.status == status)
            && self.from.map_or(true, |from| appointment.date >= from)
            && self.to.map_or(true, |to| appointment.date < to)
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// An appointment request not yet committed to storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub patient_id: Uuid,
    pub date: NaiveDate,
    /// Either a slot label ("09:30 AM") or a 24-hour "HH:MM" pair.
    pub time: String,
    pub source: AppointmentSource,
    pub price: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

// ==============================================================================
// EVENTS
// ==============================================================================

/// Published after a write succeeds. Observers (statistics, notifications)
/// react to these; the scheduling services never call them directly.
#[derive(Debug, Clone, PartialEq)]
pub enum AppointmentEvent {
    Created(Appointment),
    StatusChanged {
        appointment: Appointment,
        previous: AppointmentStatus,
    },
    ReminderSent(Appointment),
}
