use tracing::debug;

use crate::errors::{ClinicError, ClinicResult};
use crate::models::appointment::NewAppointment;
use crate::models::party::PartyKind;
use crate::models::status::Status;
use crate::store::{AppointmentStore, PartyDirectory};

/// Seeds the status of a new appointment before it is stored.
///
/// Rules apply in order and the first match wins:
///
/// 1. no requested hour: `RED`
/// 2. hour outside the doctor's window: `RED` (unknown doctor: `NotFound`)
/// 3. hour outside the patient's window: `RED` (unknown patient: `NotFound`)
/// 4. a stored appointment holds the same patient or doctor at that hour: every
///    such appointment is marked `YELLOW` in the store, and so is the new one
/// 5. otherwise `GREEN`
///
/// This is only a first guess; the schedule search decides the final status.
pub async fn classify<S>(store: &S, request: NewAppointment) -> ClinicResult<Status>
where
    S: PartyDirectory + AppointmentStore + ?Sized,
{
    let Some(time) = request.time else {
        return Ok(Status::Red);
    };

    let doctor = store
        .find_party(PartyKind::Doctor, request.id_doctor)
        .await?
        .ok_or_else(|| {
            ClinicError::NotFound(format!("Doctor with ID {} not found", request.id_doctor))
        })?;
    if !doctor.availability.contains(time) {
        return Ok(Status::Red);
    }

    let patient = store
        .find_party(PartyKind::Patient, request.id_patient)
        .await?
        .ok_or_else(|| {
            ClinicError::NotFound(format!("Patient with ID {} not found", request.id_patient))
        })?;
    if !patient.availability.contains(time) {
        return Ok(Status::Red);
    }

    let contended = store
        .mark_conflicts_yellow(request.id_patient, request.id_doctor, time)
        .await?;
    if contended > 0 {
        debug!(
            "Appointment patient={} doctor={} at {} contends with {} existing",
            request.id_patient, request.id_doctor, time, contended
        );
        return Ok(Status::Yellow);
    }

    Ok(Status::Green)
}
