// libs/scheduling-cell/src/error.rs
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::AppointmentStatus;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulingError {
    #[error("Appointment date {date} is in the past")]
    PastDate { date: NaiveDate },

    #[error("Appointment time {requested} has already passed")]
    PastTime { requested: NaiveDateTime },

    #[error("Clinic is closed on {weekday}")]
    ClinicClosed { weekday: String },

    #[error("{time} is not a bookable slot within the clinic's working hours")]
    OutsideWorkingHours { time: String },

    #[error("Invalid time format: '{0}'")]
    InvalidTimeFormat(String),

    /// Recovered by the default slot template; never returned to callers.
    #[error("Malformed working hours: {0}")]
    MalformedWorkingHours(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Slot at {date} is already taken for this clinic")]
    SlotTaken { date: NaiveDateTime },

    #[error("Appointment not found: {0}")]
    NotFound(Uuid),

    #[error("Reminder not available: {0}")]
    ReminderNotEligible(String),

    #[error("Notification delivery failed: {0}")]
    NotificationFailed(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<SchedulingError> for AppError {
    fn from(error: SchedulingError) -> Self {
        let message = error.to_string();
        match error {
            SchedulingError::PastDate { .. }
            | SchedulingError::PastTime { .. }
            | SchedulingError::ClinicClosed { .. }
            | SchedulingError::OutsideWorkingHours { .. }
            | SchedulingError::InvalidTimeFormat(_)
            | SchedulingError::ReminderNotEligible(_) => AppError::ValidationError(message),
            SchedulingError::InvalidTransition { .. } | SchedulingError::SlotTaken { .. } => {
                AppError::Conflict(message)
            }
            SchedulingError::NotFound(_) => AppError::NotFound(message),
            SchedulingError::NotificationFailed(_) => AppError::ExternalService(message),
            SchedulingError::MalformedWorkingHours(_) | SchedulingError::Store(_) => {
                AppError::Internal(message)
            }
        }
    }
}
