use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments",
            get(handlers::appointments::get_appointments)
                .post(handlers::appointments::create_appointment)
                .patch(handlers::appointments::approve_appointments)
                .delete(handlers::appointments::clear_appointments),
        )
        .route(
            "/api/appointments/bulk",
            post(handlers::appointments::create_appointments_bulk),
        )
}
