use async_trait::async_trait;
use mockall::mock;

use medsync_core::errors::ClinicResult;
use medsync_core::models::{
    appointment::Appointment,
    party::{Hour, Party, PartyId, PartyKind},
};
use medsync_core::store::{AppointmentStore, ClinicStore, PartyDirectory};

// Mock store for testing the service layer without a database
mock! {
    pub Store {}

    #[async_trait]
    impl PartyDirectory for Store {
        async fn find_party(&self, kind: PartyKind, id: PartyId) -> ClinicResult<Option<Party>>;

        async fn parties_by_ids(
            &self,
            kind: PartyKind,
            ids: &[PartyId],
        ) -> ClinicResult<Vec<Party>>;

        async fn create_party(&self, kind: PartyKind, party: &Party) -> ClinicResult<Party>;
    }

    #[async_trait]
    impl AppointmentStore for Store {
        async fn list_appointments(&self) -> ClinicResult<Vec<Appointment>>;

        async fn insert_appointment(&self, appointment: &Appointment) -> ClinicResult<Appointment>;

        async fn mark_conflicts_yellow(
            &self,
            id_patient: PartyId,
            id_doctor: PartyId,
            time: Hour,
        ) -> ClinicResult<u64>;

        async fn replace_appointments(&self, appointments: &[Appointment]) -> ClinicResult<()>;
    }

    #[async_trait]
    impl ClinicStore for Store {
        async fn clear_all(&self) -> ClinicResult<u64>;
    }
}
