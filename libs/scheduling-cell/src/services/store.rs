// libs/scheduling-cell/src/services/store.rs
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::SchedulingError;
use crate::models::{Appointment, AppointmentFilter, AppointmentStatus, NewAppointment};
use crate::services::lifecycle::AppointmentLifecycleService;

/// Persistence boundary for appointments.
///
/// Implementations must check slot ownership and write in one atomic step,
/// returning [`SchedulingError::SlotTaken`] when another non-cancelled appointment
/// already holds `(clinic_id, date)`. Status writes must go through
/// [`AppointmentLifecycleService::validate_status_transition`] and report the
/// status they replaced, read under the same lock as the write.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn create_appointment(&self, appointment: NewAppointment) -> Result<Appointment, SchedulingError>;

    /// Returns the updated appointment and its previous status.
    async fn update_appointment_status(
        &self,
        id: Uuid,
        new_status: AppointmentStatus,
    ) -> Result<(Appointment, AppointmentStatus), SchedulingError>;

    async fn get_appointment(&self, id: Uuid) -> Result<Appointment, SchedulingError>;

    /// Matching appointments ordered by date.
    async fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, SchedulingError>;
}

#[derive(Debug, Default)]
pub struct InMemoryAppointmentStore {
    appointments: RwLock<HashMap<Uuid, Appointment>>,
    lifecycle: AppointmentLifecycleService,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn create_appointment(&self, appointment: NewAppointment) -> Result<Appointment, SchedulingError> {
        let mut appointments = self.appointments.write().await;

        let taken = appointments.values().any(|existing| {
            existing.clinic_id == appointment.clinic_id
                && existing.date == appointment.date
                && existing.status.holds_slot()
        });

        if taken {
            warn!(
                "Slot {} for clinic {} was claimed by another booking",
                appointment.date, appointment.clinic_id
            );
            return Err(SchedulingError::SlotTaken { date: appointment.date });
        }

        let created = Appointment {
            id: Uuid::new_v4(),
            patient_id: appointment.patient_id,
            clinic_id: appointment.clinic_id,
            date: appointment.date,
            status: appointment.status,
            source: appointment.source,
            price: appointment.price,
            notes: appointment.notes,
            created_at: appointment.created_at,
        };

        appointments.insert(created.id, created.clone());
        info!("Appointment {} stored as {}", created.id, created.status);

        Ok(created)
    }

    async fn update_appointment_status(
        &self,
        id: Uuid,
        new_status: AppointmentStatus,
    ) -> Result<(Appointment, AppointmentStatus), SchedulingError> {
        let mut appointments = self.appointments.write().await;
        let appointment = appointments.get_mut(&id).ok_or(SchedulingError::NotFound(id))?;

        let previous = appointment.status;
        appointment.status = self
            .lifecycle
            .validate_status_transition(&previous, &new_status)?;

        debug!("Appointment {} is now {} (was {})", id, appointment.status, previous);
        Ok((appointment.clone(), previous))
    }

    async fn get_appointment(&self, id: Uuid) -> Result<Appointment, SchedulingError> {
        self.appointments
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SchedulingError::NotFound(id))
    }

    async fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, SchedulingError> {
        let mut matching: Vec<Appointment> = self
            .appointments
            .read()
            .await
            .values()
            .filter(|appointment| filter.matches(appointment))
            .cloned()
            .collect();

        matching.sort_by_key(|appointment| (appointment.date, appointment.created_at));
        Ok(matching)
    }
}
