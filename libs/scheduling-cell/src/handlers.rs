// libs/scheduling-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{AppointmentFilter, AppointmentStatus, BookAppointmentRequest, UpdateStatusRequest};
use crate::services::booking::AppointmentBookingService;
use crate::services::time_of_day::format_appointment_time;

pub type SchedulingState = Arc<AppointmentBookingService>;

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct AppointmentQueryParams {
    pub clinic_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl From<AppointmentQueryParams> for AppointmentFilter {
    fn from(params: AppointmentQueryParams) -> Self {
        Self {
            clinic_id: params.clinic_id,
            patient_id: params.patient_id,
            status: params.status,
            from: params.from,
            to: params.to,
        }
    }
}

// ==============================================================================
// SLOT HANDLERS
// ==============================================================================

pub async fn get_clinic_slots(
    State(service): State<SchedulingState>,
    Path(clinic_id): Path<Uuid>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Value>, AppError> {
    let slots = service.available_slots(clinic_id, query.date).await?;

    Ok(Json(json!({
        "success": true,
        "clinic_id": clinic_id,
        "date": query.date,
        "slots": slots,
    })))
}

// ==============================================================================
// APPOINTMENT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn book_appointment(
    State(service): State<SchedulingState>,
    Path(clinic_id): Path<Uuid>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let appointment = service.book_appointment(clinic_id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "appointment": appointment,
            "display_time": format_appointment_time(appointment.date),
            "message": "Appointment booked successfully"
        })),
    ))
}

pub async fn search_appointments(
    State(service): State<SchedulingState>,
    Query(params): Query<AppointmentQueryParams>,
) -> Result<Json<Value>, AppError> {
    let appointments = service.list_appointments(&params.into()).await?;

    let rows: Vec<Value> = appointments
        .iter()
        .map(|appointment| {
            json!({
                "appointment": appointment,
                "display_time": format_appointment_time(appointment.date),
            })
        })
        .collect();

    Ok(Json(json!({
        "success": true,
        "total": rows.len(),
        "appointments": rows,
    })))
}

pub async fn get_appointment(
    State(service): State<SchedulingState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = service.get_appointment(appointment_id).await?;
    let reminder_available = service.reminder_offered(&appointment);

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "display_time": format_appointment_time(appointment.date),
        "reminder_available": reminder_available,
    })))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(service): State<SchedulingState>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = service.update_status(appointment_id, request.status).await?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": format!("Appointment is now {}", appointment.status)
    })))
}

pub async fn get_valid_transitions(
    State(service): State<SchedulingState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let transitions = service.valid_transitions(appointment_id).await?;

    Ok(Json(json!({
        "success": true,
        "appointment_id": appointment_id,
        "valid_transitions": transitions,
    })))
}

pub async fn send_reminder(
    State(service): State<SchedulingState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = service.send_reminder(appointment_id).await?;

    Ok(Json(json!({
        "success": true,
        "appointment_id": appointment.id,
        "message": "Reminder sent"
    })))
}
