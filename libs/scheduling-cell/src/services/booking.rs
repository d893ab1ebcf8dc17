// libs/scheduling-cell/src/services/booking.rs
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_config::AppConfig;

use crate::error::SchedulingError;
use crate::models::{
    Appointment, AppointmentEvent, AppointmentFilter, AppointmentStatus, BookAppointmentRequest,
    NewAppointment, TimeSlot,
};
use crate::services::clinic::ClinicProfileReader;
use crate::services::clock::Clock;
use crate::services::lifecycle::AppointmentLifecycleService;
use crate::services::notification::NotificationTrigger;
use crate::services::reminder::can_offer_reminder;
use crate::services::slots::{generate_slots, mark_unavailable};
use crate::services::store::AppointmentStore;
use crate::services::time_of_day::TimeOfDay;
use crate::services::validator::validate_candidate;

const EVENT_CHANNEL_CAPACITY: usize = 256;

pub struct AppointmentBookingService {
    clinics: Arc<dyn ClinicProfileReader>,
    store: Arc<dyn AppointmentStore>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn NotificationTrigger>,
    lifecycle: AppointmentLifecycleService,
    auto_confirm_online_bookings: bool,
    events: broadcast::Sender<AppointmentEvent>,
}

impl AppointmentBookingService {
    pub fn new(
        config: &AppConfig,
        clinics: Arc<dyn ClinicProfileReader>,
        store: Arc<dyn AppointmentStore>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn NotificationTrigger>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            clinics,
            store,
            clock,
            notifier,
            lifecycle: AppointmentLifecycleService::new(),
            auto_confirm_online_bookings: config.auto_confirm_online_bookings,
            events,
        }
    }

    /// Observers (statistics, notifications) subscribe here.
    pub fn subscribe(&self) -> broadcast::Receiver<AppointmentEvent> {
        self.events.subscribe()
    }

    /// Slots for the booking UI. Slots held by a non-cancelled appointment,
    /// and slots that have already started, are marked unavailable.
    pub async fn available_slots(&self, clinic_id: Uuid, date: NaiveDate) -> Result<Vec<TimeSlot>, SchedulingError> {
        debug!("Generating slots for clinic {} on {}", clinic_id, date);

        let working_hours = self.clinics.get_working_hours(clinic_id).await?;
        let mut slots = generate_slots(date, working_hours.as_ref());
        if slots.is_empty() {
            return Ok(slots);
        }

        let day_start = date.and_time(chrono::NaiveTime::MIN);
        let filter = AppointmentFilter {
            clinic_id: Some(clinic_id),
            from: Some(day_start),
            to: Some(day_start + Duration::days(1)),
            ..Default::default()
        };

        let mut taken: Vec<TimeOfDay> = self
            .store
            .list_appointments(&filter)
            .await?
            .into_iter()
            .filter(|appointment| appointment.status.holds_slot())
            .map(|appointment| TimeOfDay::from_naive_time(appointment.date.time()))
            .collect();

        // Same cutoff as the PastTime check at submission.
        let now = self.clock.now();
        taken.extend(
            slots
                .iter()
                .filter_map(TimeSlot::time_of_day)
                .filter(|start| date.and_time(start.to_naive_time()) < now),
        );

        mark_unavailable(&mut slots, &taken);
        Ok(slots)
    }

    /// Re-validates the candidate against fresh working hours and the clock,
    /// then asks the store to claim the slot.
    pub async fn book_appointment(
        &self,
        clinic_id: Uuid,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, SchedulingError> {
        info!(
            "Booking request for clinic {} on {} at {} ({})",
            clinic_id, request.date, request.time, request.source
        );

        let working_hours = self.clinics.get_working_hours(clinic_id).await?;
        let now = self.clock.now();

        let date = validate_candidate(request.date, &request.time, working_hours.as_ref(), now)
            .inspect_err(|e| warn!("Booking rejected: {}", e))?;

        let status = self
            .lifecycle
            .initial_status(request.source, self.auto_confirm_online_bookings);

        let appointment = self
            .store
            .create_appointment(NewAppointment {
                patient_id: request.patient_id,
                clinic_id,
                date,
                status,
                source: request.source,
                price: request.price,
                notes: request.notes,
                created_at: now,
            })
            .await?;

        self.publish(AppointmentEvent::Created(appointment.clone()));
        Ok(appointment)
    }

    pub async fn update_status(&self, id: Uuid, new_status: AppointmentStatus) -> Result<Appointment, SchedulingError> {
        let (appointment, previous) = self.store.update_appointment_status(id, new_status).await?;

        if previous != appointment.status {
            info!("Appointment {} moved {} -> {}", id, previous, appointment.status);
            self.publish(AppointmentEvent::StatusChanged {
                appointment: appointment.clone(),
                previous,
            });
        }

        Ok(appointment)
    }

    pub async fn get_appointment(&self, id: Uuid) -> Result<Appointment, SchedulingError> {
        self.store.get_appointment(id).await
    }

    pub async fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, SchedulingError> {
        self.store.list_appointments(filter).await
    }

    pub async fn valid_transitions(&self, id: Uuid) -> Result<Vec<AppointmentStatus>, SchedulingError> {
        let appointment = self.store.get_appointment(id).await?;
        Ok(self.lifecycle.get_valid_transitions(&appointment.status))
    }

    /// Whether the reminder action should be offered right now.
    pub async fn reminder_available(&self, id: Uuid) -> Result<bool, SchedulingError> {
        let appointment = self.store.get_appointment(id).await?;
        Ok(self.reminder_offered(&appointment))
    }

    /// Same check for an appointment the caller already holds.
    pub fn reminder_offered(&self, appointment: &Appointment) -> bool {
        can_offer_reminder(appointment, self.clock.now())
    }

    /// Explicit, user-requested reminder. Delivery failures are returned as-is.
    pub async fn send_reminder(&self, id: Uuid) -> Result<Appointment, SchedulingError> {
        let appointment = self.store.get_appointment(id).await?;

        if !can_offer_reminder(&appointment, self.clock.now()) {
            return Err(SchedulingError::ReminderNotEligible(format!(
                "appointment {} is {} at {}",
                appointment.id, appointment.status, appointment.date
            )));
        }

        self.notifier.send_reminder(&appointment).await.inspect_err(|e| {
            warn!("Reminder for appointment {} failed: {}", appointment.id, e);
        })?;

        self.publish(AppointmentEvent::ReminderSent(appointment.clone()));
        Ok(appointment)
    }

    fn publish(&self, event: AppointmentEvent) {
        if self.events.send(event).is_err() {
            debug!("No appointment event subscribers");
        }
    }
}
