// libs/scheduling-cell/src/router.rs
use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{self, SchedulingState};

pub fn scheduling_routes(state: SchedulingState) -> Router {
    Router::new()
        // Booking UI
        .route("/clinics/{clinic_id}/slots", get(handlers::get_clinic_slots))
        .route("/clinics/{clinic_id}/appointments", post(handlers::book_appointment))

        // Appointment management
        .route("/appointments", get(handlers::search_appointments))
        .route("/appointments/{appointment_id}", get(handlers::get_appointment))
        .route("/appointments/{appointment_id}/status", patch(handlers::update_appointment_status))
        .route("/appointments/{appointment_id}/transitions", get(handlers::get_valid_transitions))
        .route("/appointments/{appointment_id}/reminder", post(handlers::send_reminder))

        .with_state(state)
}
