use axum::http::StatusCode;
use medsync_api::middleware::error_handling::{AppError, map_error};
use medsync_core::errors::ClinicError;
use rstest::rstest;

#[rstest]
#[case(ClinicError::NotFound("Doctor with ID 1 not found".into()), StatusCode::NOT_FOUND)]
#[case(ClinicError::Validation("Invalid input".into()), StatusCode::BAD_REQUEST)]
#[case(ClinicError::Duplicate("Patient with ID 1".into()), StatusCode::CONFLICT)]
#[case(ClinicError::Transaction("rolled back".into()), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(ClinicError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    ClinicError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: ClinicError, #[case] expected: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), expected);
}

#[test]
fn test_eyre_report_maps_to_database_error() {
    let error: AppError = eyre::eyre!("pool timed out").into();

    assert!(matches!(error.0, ClinicError::Database(_)));
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let response = map_error(ClinicError::Validation("time must be between 0 and 23, got 30".into()));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(
        body,
        serde_json::json!({ "error": "Validation error: time must be between 0 and 23, got 30" })
    );
}

#[tokio::test]
async fn test_non_timeout_middleware_failure_is_internal() {
    let error: axum::BoxError = Box::new(std::io::Error::new(
        std::io::ErrorKind::BrokenPipe,
        "service failed",
    ));

    let response = medsync_api::middleware::error_handling::handle_middleware_error(error).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
