//! In-process store used when no database is configured, and by tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use medsync_core::errors::{ClinicError, ClinicResult};
use medsync_core::models::{
    appointment::Appointment,
    party::{Hour, Party, PartyId, PartyKind},
    status::Status,
};
use medsync_core::store::{AppointmentStore, ClinicStore, PartyDirectory};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryState {
    doctors: BTreeMap<PartyId, Party>,
    patients: BTreeMap<PartyId, Party>,
    appointments: Vec<Appointment>,
}

impl MemoryState {
    fn parties(&self, kind: PartyKind) -> &BTreeMap<PartyId, Party> {
        match kind {
            PartyKind::Doctor => &self.doctors,
            PartyKind::Patient => &self.patients,
        }
    }

    fn parties_mut(&mut self, kind: PartyKind) -> &mut BTreeMap<PartyId, Party> {
        match kind {
            PartyKind::Doctor => &mut self.doctors,
            PartyKind::Patient => &mut self.patients,
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PartyDirectory for MemoryStore {
    async fn find_party(&self, kind: PartyKind, id: PartyId) -> ClinicResult<Option<Party>> {
        Ok(self.state.read().await.parties(kind).get(&id).cloned())
    }

    async fn parties_by_ids(&self, kind: PartyKind, ids: &[PartyId]) -> ClinicResult<Vec<Party>> {
        let state = self.state.read().await;
        Ok(state
            .parties(kind)
            .values()
            .filter(|party| ids.contains(&party.id))
            .cloned()
            .collect())
    }

    async fn create_party(&self, kind: PartyKind, party: &Party) -> ClinicResult<Party> {
        let mut state = self.state.write().await;
        let parties = state.parties_mut(kind);
        if parties.contains_key(&party.id) {
            return Err(ClinicError::Duplicate(format!("{} with ID {}", kind, party.id)));
        }
        parties.insert(party.id, party.clone());
        Ok(party.clone())
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn list_appointments(&self) -> ClinicResult<Vec<Appointment>> {
        Ok(self.state.read().await.appointments.clone())
    }

    async fn insert_appointment(&self, appointment: &Appointment) -> ClinicResult<Appointment> {
        self.state.write().await.appointments.push(appointment.clone());
        Ok(appointment.clone())
    }

    async fn mark_conflicts_yellow(
        &self,
        id_patient: PartyId,
        id_doctor: PartyId,
        time: Hour,
    ) -> ClinicResult<u64> {
        let mut state = self.state.write().await;
        let mut matched = 0;
        for appointment in state
            .appointments
            .iter_mut()
            .filter(|a| a.collides_with(id_patient, id_doctor, time))
        {
            appointment.status = Status::Yellow;
            matched += 1;
        }
        Ok(matched)
    }

    async fn replace_appointments(&self, appointments: &[Appointment]) -> ClinicResult<()> {
        self.state.write().await.appointments = appointments.to_vec();
        Ok(())
    }
}

#[async_trait]
impl ClinicStore for MemoryStore {
    async fn clear_all(&self) -> ClinicResult<u64> {
        let mut state = self.state.write().await;
        let deleted = state.appointments.len() + state.doctors.len() + state.patients.len();
        *state = MemoryState::default();
        Ok(deleted as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medsync_core::models::party::Availability;

    fn party(id: PartyId) -> Party {
        Party {
            id,
            availability: Availability::new(9, 12).unwrap(),
            name: None,
            birthday: None,
        }
    }

    fn appointment(id_patient: PartyId, id_doctor: PartyId, time: Option<Hour>) -> Appointment {
        Appointment {
            id_patient,
            id_doctor,
            time,
            status: Status::Green,
        }
    }

    #[tokio::test]
    async fn duplicate_party_ids_are_rejected_per_kind() {
        let store = MemoryStore::new();
        store.create_party(PartyKind::Doctor, &party(1)).await.unwrap();
        store.create_party(PartyKind::Patient, &party(1)).await.unwrap();

        let err = store
            .create_party(PartyKind::Doctor, &party(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ClinicError::Duplicate(_)));
    }

    #[tokio::test]
    async fn mark_conflicts_counts_already_yellow_matches() {
        let store = MemoryStore::new();
        store.insert_appointment(&appointment(1, 1, Some(9))).await.unwrap();
        store.insert_appointment(&appointment(2, 1, Some(9))).await.unwrap();
        store.insert_appointment(&appointment(3, 2, Some(9))).await.unwrap();
        store.insert_appointment(&appointment(1, 3, None)).await.unwrap();

        assert_eq!(store.mark_conflicts_yellow(4, 1, 9).await.unwrap(), 2);
        assert_eq!(store.mark_conflicts_yellow(4, 1, 9).await.unwrap(), 2);

        let statuses: Vec<Status> = store
            .list_appointments()
            .await
            .unwrap()
            .iter()
            .map(|a| a.status)
            .collect();
        assert_eq!(
            statuses,
            vec![Status::Yellow, Status::Yellow, Status::Green, Status::Green]
        );
    }

    #[tokio::test]
    async fn clear_all_counts_every_record() {
        let store = MemoryStore::new();
        store.create_party(PartyKind::Doctor, &party(1)).await.unwrap();
        store.create_party(PartyKind::Patient, &party(2)).await.unwrap();
        store.insert_appointment(&appointment(2, 1, Some(9))).await.unwrap();

        assert_eq!(store.clear_all().await.unwrap(), 3);
        assert!(store.list_appointments().await.unwrap().is_empty());
        assert!(store.find_party(PartyKind::Doctor, 1).await.unwrap().is_none());
    }
}
