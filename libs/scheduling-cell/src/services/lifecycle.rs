// libs/scheduling-cell/src/services/lifecycle.rs
use tracing::{debug, info, warn};

use crate::error::SchedulingError;
use crate::models::{AppointmentSource, AppointmentStatus};

/// Single authority over appointment status changes. Stores call
/// [`validate_status_transition`](Self::validate_status_transition) before
/// every status write.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppointmentLifecycleService;

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Validate that a status transition is allowed and return the status to write.
    /// Re-applying the current status is a tolerated no-op.
    pub fn validate_status_transition(
        &self,
        current_status: &AppointmentStatus,
        new_status: &AppointmentStatus,
    ) -> Result<AppointmentStatus, SchedulingError> {
        debug!("Validating status transition from {} to {}", current_status, new_status);

        if current_status == new_status {
            return Ok(*new_status);
        }

        if !self.get_valid_transitions(current_status).contains(new_status) {
            warn!("Invalid status transition attempted: {} -> {}", current_status, new_status);
            return Err(SchedulingError::InvalidTransition {
                from: *current_status,
                to: *new_status,
            });
        }

        info!("Status transition validated: {} -> {}", current_status, new_status);
        Ok(*new_status)
    }

    /// Get all valid next statuses for a given current status
    pub fn get_valid_transitions(&self, current_status: &AppointmentStatus) -> Vec<AppointmentStatus> {
        match current_status {
            AppointmentStatus::Pending => vec![
                AppointmentStatus::Confirmed,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Confirmed => vec![
                AppointmentStatus::Completed,
                AppointmentStatus::Cancelled,
            ],
            // Terminal states - no transitions allowed
            AppointmentStatus::Completed => vec![],
            AppointmentStatus::Cancelled => vec![],
        }
    }

    pub fn is_terminal(&self, status: &AppointmentStatus) -> bool {
        self.get_valid_transitions(status).is_empty()
    }

    /// Staff-created appointments wait for confirmation; online bookings
    /// start confirmed only when the clinic opts in.
    pub fn initial_status(
        &self,
        source: AppointmentSource,
        auto_confirm_online_bookings: bool,
    ) -> AppointmentStatus {
        match source {
            AppointmentSource::Booking if auto_confirm_online_bookings => AppointmentStatus::Confirmed,
            _ => AppointmentStatus::Pending,
        }
    }
}
