// libs/scheduling-cell/src/services/notification.rs
use async_trait::async_trait;
use tracing::info;

use crate::error::SchedulingError;
use crate::models::Appointment;
use crate::services::time_of_day::format_appointment_time;

/// Fire-and-forget reminder delivery (WhatsApp, SMS, ...). Failures are
/// returned to the caller and never retried here.
#[async_trait]
pub trait NotificationTrigger: Send + Sync {
    async fn send_reminder(&self, appointment: &Appointment) -> Result<(), SchedulingError>;
}

/// Writes reminders to the log instead of delivering them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotificationTrigger;

#[async_trait]
impl NotificationTrigger for LoggingNotificationTrigger {
    async fn send_reminder(&self, appointment: &Appointment) -> Result<(), SchedulingError> {
        info!(
            "Reminder for appointment {} (patient {}) at {}",
            appointment.id,
            appointment.patient_id,
            format_appointment_time(appointment.date)
        );
        Ok(())
    }
}
