//! # Error Handling Middleware
//!
//! Maps `ClinicError` to HTTP status codes and `{"error": "<message>"}` bodies so
//! every handler reports failures the same way.

use axum::{
    BoxError, Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use medsync_core::errors::ClinicError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use medsync_api::middleware::error_handling::AppError;
/// use medsync_core::errors::ClinicError;
///
/// async fn handler(id: i64) -> Result<Json<i64>, AppError> {
///     if id < 0 {
///         return Err(AppError(ClinicError::Validation("id must not be negative".into())));
///     }
///     Ok(Json(id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ClinicError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ClinicError::NotFound(_) => StatusCode::NOT_FOUND,
            ClinicError::Validation(_) => StatusCode::BAD_REQUEST,
            ClinicError::Duplicate(_) => StatusCode::CONFLICT,
            ClinicError::Transaction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ClinicError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ClinicError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// Automatic conversion from ClinicError to AppError
impl From<ClinicError> for AppError {
    fn from(err: ClinicError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError, as a database failure
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ClinicError::Database(err))
    }
}

/// Maps a ClinicError to an HTTP response
pub fn map_error(err: ClinicError) -> Response {
    AppError(err).into_response()
}

/// Converts failures raised by the `tower` middleware stack (request timeout)
/// into a JSON response.
pub async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        let body = Json(json!({ "error": "Request timed out" }));
        return (StatusCode::REQUEST_TIMEOUT, body).into_response();
    }

    map_error(ClinicError::Internal(err))
}
