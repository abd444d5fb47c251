use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};

use crate::errors::{ClinicError, ClinicResult};
use crate::models::party::{Hour, HOURS_PER_DAY, PartyId};
use crate::models::status::Status;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id_patient: PartyId,
    pub id_doctor: PartyId,
    #[serde(default)]
    pub time: Option<Hour>,
    pub status: Status,
}

impl Appointment {
    /// True when both appointments would hold the same doctor or the same patient
    /// at the same hour.
    pub fn collides_with(&self, id_patient: PartyId, id_doctor: PartyId, time: Hour) -> bool {
        self.time == Some(time) && (self.id_patient == id_patient || self.id_doctor == id_doctor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub id_patient: i64,
    pub id_doctor: i64,
    #[serde(default)]
    pub time: Option<i64>,
}

/// A validated booking request, ready for the pre-classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewAppointment {
    pub id_patient: PartyId,
    pub id_doctor: PartyId,
    pub time: Option<Hour>,
}

impl NewAppointment {
    pub fn with_status(self, status: Status) -> Appointment {
        Appointment {
            id_patient: self.id_patient,
            id_doctor: self.id_doctor,
            time: self.time,
            status,
        }
    }
}

impl CreateAppointmentRequest {
    pub fn validate(&self) -> ClinicResult<NewAppointment> {
        if self.id_patient < 0 {
            return Err(ClinicError::Validation("idPatient must not be negative".to_string()));
        }
        if self.id_doctor < 0 {
            return Err(ClinicError::Validation("idDoctor must not be negative".to_string()));
        }

        let time = match self.time {
            Some(hour) if !(0..HOURS_PER_DAY).contains(&hour) => {
                return Err(ClinicError::Validation(format!(
                    "time must be between 0 and 23, got {}",
                    hour
                )));
            }
            Some(hour) => Some(hour as Hour),
            None => None,
        };

        Ok(NewAppointment {
            id_patient: self.id_patient,
            id_doctor: self.id_doctor,
            time,
        })
    }
}

/// Stored appointments next to the schedule the engine resolved from them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSnapshot {
    pub appointments: Vec<Appointment>,
    pub resolved_schedule: Vec<Appointment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkError<T> {
    pub entity: T,
    pub error: String,
}

/// Result of a bulk submission: entries that failed validation or processing,
/// and the records that were created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkResponse<T, R> {
    pub errors: Vec<BulkError<T>>,
    pub created: Vec<R>,
}

impl<T, R> Default for BulkResponse<T, R> {
    fn default() -> Self {
        Self {
            errors: Vec::new(),
            created: Vec::new(),
        }
    }
}

impl<T, R> BulkResponse<T, R> {
    /// Wire form with the created records listed under `field`.
    pub fn named(self, field: &'static str) -> NamedBulkResponse<T, R> {
        NamedBulkResponse {
            field,
            response: self,
        }
    }
}

/// Serializes as `{"errors": [...], "<field>": [...]}`, e.g. `appointments`
/// or `doctors`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedBulkResponse<T, R> {
    pub field: &'static str,
    pub response: BulkResponse<T, R>,
}

impl<T: Serialize, R: Serialize> Serialize for NamedBulkResponse<T, R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("errors", &self.response.errors)?;
        map.serialize_entry(self.field, &self.response.created)?;
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    pub deleted_count: u64,
}

/// Outcome of an approval. `committed` is false when the stored set already
/// matched the approved schedule and nothing was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveResponse {
    pub committed: bool,
}
