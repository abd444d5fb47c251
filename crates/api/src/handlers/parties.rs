use axum::{Json, extract::State};
use medsync_core::models::{
    appointment::NamedBulkResponse,
    party::{CreatePartyRequest, Party, PartyKind},
};
use serde_json::Value;
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

async fn register(
    state: &ApiState,
    kind: PartyKind,
    payload: &CreatePartyRequest,
) -> Result<Json<Party>, AppError> {
    let party = state.booking.register_party(kind, payload).await?;
    Ok(Json(party))
}

async fn register_bulk(
    state: &ApiState,
    kind: PartyKind,
    payload: Vec<Value>,
) -> Result<Json<NamedBulkResponse<Value, Party>>, AppError> {
    let response = state.booking.register_parties(kind, payload).await?;
    Ok(Json(response.named(kind.plural())))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreatePartyRequest>,
) -> Result<Json<Party>, AppError> {
    register(&state, PartyKind::Doctor, &payload).await
}

#[axum::debug_handler]
pub async fn create_doctors_bulk(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<Vec<Value>>,
) -> Result<Json<NamedBulkResponse<Value, Party>>, AppError> {
    register_bulk(&state, PartyKind::Doctor, payload).await
}

#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreatePartyRequest>,
) -> Result<Json<Party>, AppError> {
    register(&state, PartyKind::Patient, &payload).await
}

#[axum::debug_handler]
pub async fn create_patients_bulk(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<Vec<Value>>,
) -> Result<Json<NamedBulkResponse<Value, Party>>, AppError> {
    register_bulk(&state, PartyKind::Patient, payload).await
}
