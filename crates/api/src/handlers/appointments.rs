use axum::{Json, extract::State};
use medsync_core::models::appointment::{
    Appointment, ApproveResponse, ClearResponse, CreateAppointmentRequest, NamedBulkResponse,
    ScheduleSnapshot,
};
use serde_json::Value;
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = state.booking.submit(&payload).await?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn create_appointments_bulk(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<Vec<Value>>,
) -> Result<Json<NamedBulkResponse<Value, Appointment>>, AppError> {
    let response = state.booking.submit_bulk(payload).await?;
    Ok(Json(response.named("appointments")))
}

#[axum::debug_handler]
pub async fn get_appointments(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ScheduleSnapshot>, AppError> {
    let snapshot = state.booking.recompute().await?;
    Ok(Json(snapshot))
}

#[axum::debug_handler]
pub async fn approve_appointments(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ApproveResponse>, AppError> {
    let response = state.booking.approve().await?;
    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn clear_appointments(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ClearResponse>, AppError> {
    let response = state.booking.clear().await?;
    Ok(Json(response))
}
