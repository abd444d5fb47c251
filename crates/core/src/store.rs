//! Storage seams the booking service depends on.
//!
//! The engine itself never touches storage; these traits describe the party
//! directory and the appointment store that the service reads a snapshot from
//! and commits approved schedules to.

use async_trait::async_trait;

use crate::errors::ClinicResult;
use crate::models::appointment::Appointment;
use crate::models::party::{Hour, Party, PartyId, PartyKind};

#[async_trait]
pub trait PartyDirectory: Send + Sync {
    async fn find_party(&self, kind: PartyKind, id: PartyId) -> ClinicResult<Option<Party>>;

    async fn parties_by_ids(&self, kind: PartyKind, ids: &[PartyId]) -> ClinicResult<Vec<Party>>;

    /// Fails with `ClinicError::Duplicate` when the id is already registered for `kind`.
    async fn create_party(&self, kind: PartyKind, party: &Party) -> ClinicResult<Party>;
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// All pending appointments in insertion order.
    async fn list_appointments(&self) -> ClinicResult<Vec<Appointment>>;

    async fn insert_appointment(&self, appointment: &Appointment) -> ClinicResult<Appointment>;

    /// Marks every stored appointment holding the same patient or the same doctor
    /// at `time` as `YELLOW`. Returns how many records matched, including ones
    /// that were already `YELLOW`.
    async fn mark_conflicts_yellow(
        &self,
        id_patient: PartyId,
        id_doctor: PartyId,
        time: Hour,
    ) -> ClinicResult<u64>;

    /// Deletes every appointment and inserts `appointments` as one atomic unit.
    /// Fails with `ClinicError::Transaction` and leaves the old set intact when
    /// the replacement cannot be committed.
    async fn replace_appointments(&self, appointments: &[Appointment]) -> ClinicResult<()>;
}

#[async_trait]
pub trait ClinicStore: PartyDirectory + AppointmentStore {
    /// Removes appointments, doctors and patients. Returns the number of deleted records.
    async fn clear_all(&self) -> ClinicResult<u64>;
}
