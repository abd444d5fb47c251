use std::error::Error;
use medsync_core::errors::{ClinicError, ClinicResult};

#[test]
fn test_clinic_error_display() {
    let not_found = ClinicError::NotFound("Doctor with ID 4 not found".to_string());
    let validation = ClinicError::Validation("Invalid input".to_string());
    let duplicate = ClinicError::Duplicate("Doctor with ID 4".to_string());
    let transaction = ClinicError::Transaction("commit aborted".to_string());
    let database = ClinicError::Database(eyre::eyre!("Database connection failed"));
    let internal = ClinicError::Internal(Box::new(std::io::Error::other("Internal error")));

    assert_eq!(
        not_found.to_string(),
        "Resource not found: Doctor with ID 4 not found"
    );
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert_eq!(duplicate.to_string(), "Duplicate resource: Doctor with ID 4");
    assert_eq!(transaction.to_string(), "Transaction failed: commit aborted");
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::other("IO error");
    let clinic_error = ClinicError::Internal(Box::new(io_error));

    assert!(clinic_error.source().is_some());
}

#[test]
fn test_clinic_result() {
    let result: ClinicResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: ClinicResult<i32> = Err(ClinicError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_from_eyre_report() {
    fn load() -> ClinicResult<()> {
        Err::<(), _>(eyre::eyre!("connection reset"))?;
        Ok(())
    }

    let err = load().unwrap_err();
    assert!(matches!(err, ClinicError::Database(_)));
    assert!(err.to_string().contains("connection reset"));
}

#[test]
fn test_box_error_conversion() {
    let io_error = std::io::Error::other("IO error");
    let boxed_error: Box<dyn Error + Send + Sync> = Box::new(io_error);
    let clinic_error = ClinicError::Internal(boxed_error);

    assert!(clinic_error.to_string().contains("IO error"));
}
