use async_trait::async_trait;
use eyre::WrapErr;
use medsync_core::errors::{ClinicError, ClinicResult};
use medsync_core::models::{
    appointment::Appointment,
    party::{Hour, Party, PartyId, PartyKind},
};
use medsync_core::store::{AppointmentStore, ClinicStore, PartyDirectory};
use tracing::{debug, info};

use crate::DbPool;
use crate::repositories::{appointment, party};

/// PostgreSQL-backed store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PartyDirectory for PgStore {
    async fn find_party(&self, kind: PartyKind, id: PartyId) -> ClinicResult<Option<Party>> {
        party::get_party_by_id(&self.pool, kind, id)
            .await?
            .map(Party::try_from)
            .transpose()
    }

    async fn parties_by_ids(&self, kind: PartyKind, ids: &[PartyId]) -> ClinicResult<Vec<Party>> {
        party::get_parties_by_ids(&self.pool, kind, ids)
            .await?
            .into_iter()
            .map(Party::try_from)
            .collect()
    }

    async fn create_party(&self, kind: PartyKind, party: &Party) -> ClinicResult<Party> {
        party::create_party(&self.pool, kind, party)
            .await?
            .ok_or_else(|| ClinicError::Duplicate(format!("{} with ID {}", kind, party.id)))?
            .try_into()
    }
}

#[async_trait]
impl AppointmentStore for PgStore {
    async fn list_appointments(&self) -> ClinicResult<Vec<Appointment>> {
        appointment::get_appointments(&self.pool)
            .await?
            .into_iter()
            .map(Appointment::try_from)
            .collect()
    }

    async fn insert_appointment(&self, appointment: &Appointment) -> ClinicResult<Appointment> {
        appointment::create_appointment(&self.pool, appointment)
            .await?
            .try_into()
    }

    async fn mark_conflicts_yellow(
        &self,
        id_patient: PartyId,
        id_doctor: PartyId,
        time: Hour,
    ) -> ClinicResult<u64> {
        Ok(appointment::mark_conflicts_yellow(&self.pool, id_patient, id_doctor, i16::from(time)).await?)
    }

    async fn replace_appointments(&self, appointments: &[Appointment]) -> ClinicResult<()> {
        let commit = async {
            let mut tx = self.pool.begin().await.wrap_err("Failed to open transaction")?;

            let deleted = appointment::delete_appointments(&mut *tx).await?;
            for record in appointments {
                appointment::create_appointment(&mut *tx, record).await?;
            }
            tx.commit().await.wrap_err("Failed to commit transaction")?;

            Ok::<u64, eyre::Report>(deleted)
        };

        match commit.await {
            Ok(deleted) => {
                info!(
                    "Replaced {} appointments with {} approved ones",
                    deleted,
                    appointments.len()
                );
                Ok(())
            }
            Err(err) => Err(ClinicError::Transaction(format!("{:#}", err))),
        }
    }
}

#[async_trait]
impl ClinicStore for PgStore {
    async fn clear_all(&self) -> ClinicResult<u64> {
        let mut tx = self.pool.begin().await.wrap_err("Failed to open transaction")?;

        let appointments = appointment::delete_appointments(&mut *tx).await?;
        let doctors = party::delete_parties(&mut *tx, PartyKind::Doctor).await?;
        let patients = party::delete_parties(&mut *tx, PartyKind::Patient).await?;
        tx.commit().await.wrap_err("Failed to commit transaction")?;

        debug!(
            "Cleared {} appointments, {} doctors, {} patients",
            appointments, doctors, patients
        );
        Ok(appointments + doctors + patients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::create_test_pool;
    use medsync_core::models::{party::Availability, status::Status};

    fn party(id: PartyId, from: i64, to: i64) -> Party {
        Party {
            id,
            availability: Availability::new(from, to).unwrap(),
            name: Some("Test Party".to_string()),
            birthday: None,
        }
    }

    fn appointment(id_patient: PartyId, time: Option<Hour>, status: Status) -> Appointment {
        Appointment {
            id_patient,
            id_doctor: 1,
            time,
            status,
        }
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL database at TEST_DATABASE_URL"]
    async fn test_round_trip_and_replace() {
        let store = PgStore::new(create_test_pool().await);
        store.clear_all().await.unwrap();

        store.create_party(PartyKind::Doctor, &party(1, 9, 12)).await.unwrap();
        let duplicate = store.create_party(PartyKind::Doctor, &party(1, 9, 12)).await;
        assert!(matches!(duplicate, Err(ClinicError::Duplicate(_))));

        store
            .insert_appointment(&appointment(1, Some(9), Status::Green))
            .await
            .unwrap();
        store
            .insert_appointment(&appointment(2, None, Status::Red))
            .await
            .unwrap();
        assert_eq!(store.mark_conflicts_yellow(3, 1, 9).await.unwrap(), 1);

        let stored = store.list_appointments().await.unwrap();
        assert_eq!(stored[0].status, Status::Yellow);
        assert_eq!(stored[1].time, None);

        let approved = vec![appointment(1, Some(11), Status::Green)];
        store.replace_appointments(&approved).await.unwrap();
        assert_eq!(store.list_appointments().await.unwrap(), approved);

        let doctors = store.parties_by_ids(PartyKind::Doctor, &[1, 2]).await.unwrap();
        assert_eq!(doctors.len(), 1);

        assert_eq!(store.clear_all().await.unwrap(), 2);
    }
}
