use axum::{Router, routing::post};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/doctors", post(handlers::parties::create_doctor))
        .route("/api/doctors/bulk", post(handlers::parties::create_doctors_bulk))
        .route("/api/patients", post(handlers::parties::create_patient))
        .route(
            "/api/patients/bulk",
            post(handlers::parties::create_patients_bulk),
        )
}
