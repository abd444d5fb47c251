//! # Booking Service
//!
//! Glue between the HTTP handlers, the store and the scheduling engine.
//!
//! Every write follows the same sequence: persist, invalidate the cached
//! schedule, recompute it from a fresh snapshot and broadcast the result to
//! websocket subscribers.

use std::collections::BTreeSet;
use std::sync::Arc;

use medsync_core::{
    errors::{ClinicError, ClinicResult},
    models::{
        appointment::{
            Appointment, ApproveResponse, BulkError, BulkResponse, ClearResponse,
            CreateAppointmentRequest, ScheduleSnapshot,
        },
        party::{CreatePartyRequest, Party, PartyId, PartyKind},
    },
    scheduler::{Roster, SearchConfig, approve_schedule, classify, optimize, requires_commit},
    store::ClinicStore,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::services::{cache::ScheduleCache, notifier::{Notifier, SnapshotReceiver}};

pub struct BookingService {
    store: Arc<dyn ClinicStore>,
    cache: ScheduleCache,
    notifier: Notifier,
    search: SearchConfig,
}

impl BookingService {
    pub fn new(
        store: Arc<dyn ClinicStore>,
        cache: ScheduleCache,
        notifier: Notifier,
        search: SearchConfig,
    ) -> Self {
        Self {
            store,
            cache,
            notifier,
            search,
        }
    }

    pub fn subscribe(&self) -> SnapshotReceiver {
        self.notifier.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.notifier.subscriber_count()
    }

    /// Validates, classifies and stores one appointment request, then
    /// refreshes the published schedule.
    pub async fn submit(&self, request: &CreateAppointmentRequest) -> ClinicResult<Appointment> {
        let appointment = self.create_appointment(request).await?;
        self.refresh().await?;
        Ok(appointment)
    }

    /// Processes each entry independently. The schedule is refreshed once, and
    /// only when at least one appointment was stored.
    pub async fn submit_bulk(
        &self,
        entries: Vec<Value>,
    ) -> ClinicResult<BulkResponse<Value, Appointment>> {
        let mut response = BulkResponse::default();

        for entry in entries {
            let result = match parse_entry::<CreateAppointmentRequest>(&entry) {
                Ok(request) => self.create_appointment(&request).await,
                Err(err) => Err(err),
            };
            collect(&mut response, entry, result);
        }

        debug!(
            "Bulk appointment submission: {} created, {} rejected",
            response.created.len(),
            response.errors.len()
        );
        if !response.created.is_empty() {
            self.refresh().await?;
        }

        Ok(response)
    }

    /// Stored appointments next to the schedule resolved from them. Served from
    /// the cache while the cached entry is fresh.
    pub async fn recompute(&self) -> ClinicResult<ScheduleSnapshot> {
        if let Some(snapshot) = self.cache.get().await {
            debug!("Serving cached schedule");
            return Ok(snapshot);
        }

        let generation = self.cache.generation().await;
        let appointments = self.store.list_appointments().await?;
        let roster = self.roster_for(&appointments).await?;
        let outcome = optimize(&appointments, &roster, &self.search);
        debug!(
            "Resolved {} appointments in {} iterations (converged: {}, kept input: {})",
            appointments.len(),
            outcome.iterations,
            outcome.converged,
            outcome.kept_input
        );

        let snapshot = ScheduleSnapshot {
            appointments,
            resolved_schedule: outcome.schedule,
        };
        self.cache.put(generation, snapshot.clone()).await;

        Ok(snapshot)
    }

    /// Commits the approved form of the resolved schedule. Nothing is written
    /// or broadcast when the store already holds exactly that set.
    pub async fn approve(&self) -> ClinicResult<ApproveResponse> {
        let snapshot = self.recompute().await?;
        let approved = approve_schedule(&snapshot.resolved_schedule);

        if !requires_commit(&snapshot.appointments, &approved) {
            debug!("Stored schedule already approved, skipping commit");
            return Ok(ApproveResponse { committed: false });
        }

        self.store.replace_appointments(&approved).await?;
        info!("Committed {} approved appointments", approved.len());
        self.refresh().await?;

        Ok(ApproveResponse { committed: true })
    }

    pub async fn clear(&self) -> ClinicResult<ClearResponse> {
        let deleted_count = self.store.clear_all().await?;
        info!("Cleared {} records", deleted_count);
        self.refresh().await?;

        Ok(ClearResponse { deleted_count })
    }

    pub async fn register_party(
        &self,
        kind: PartyKind,
        request: &CreatePartyRequest,
    ) -> ClinicResult<Party> {
        let party = self.create_party(kind, request).await?;
        self.refresh().await?;
        Ok(party)
    }

    pub async fn register_parties(
        &self,
        kind: PartyKind,
        entries: Vec<Value>,
    ) -> ClinicResult<BulkResponse<Value, Party>> {
        let mut response = BulkResponse::default();

        for entry in entries {
            let result = match parse_entry::<CreatePartyRequest>(&entry) {
                Ok(request) => self.create_party(kind, &request).await,
                Err(err) => Err(err),
            };
            collect(&mut response, entry, result);
        }

        debug!(
            "Bulk {} registration: {} created, {} rejected",
            kind,
            response.created.len(),
            response.errors.len()
        );
        if !response.created.is_empty() {
            self.refresh().await?;
        }

        Ok(response)
    }

    async fn create_appointment(
        &self,
        request: &CreateAppointmentRequest,
    ) -> ClinicResult<Appointment> {
        let request = request.validate()?;
        let status = classify(self.store.as_ref(), request).await?;
        self.store
            .insert_appointment(&request.with_status(status))
            .await
    }

    async fn create_party(
        &self,
        kind: PartyKind,
        request: &CreatePartyRequest,
    ) -> ClinicResult<Party> {
        let party = request.validate()?;
        let created = self.store.create_party(kind, &party).await?;
        debug!("Registered {} {}", kind, created.id);
        Ok(created)
    }

    async fn roster_for(&self, appointments: &[Appointment]) -> ClinicResult<Roster> {
        let doctor_ids: Vec<PartyId> = appointments
            .iter()
            .map(|a| a.id_doctor)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let patient_ids: Vec<PartyId> = appointments
            .iter()
            .map(|a| a.id_patient)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let doctors = self
            .store
            .parties_by_ids(PartyKind::Doctor, &doctor_ids)
            .await?;
        let patients = self
            .store
            .parties_by_ids(PartyKind::Patient, &patient_ids)
            .await?;

        Ok(Roster::new(doctors, patients))
    }

    async fn refresh(&self) -> ClinicResult<ScheduleSnapshot> {
        self.cache.invalidate().await;
        let snapshot = self.recompute().await?;
        self.notifier.publish(&snapshot)?;
        Ok(snapshot)
    }
}

fn parse_entry<T: DeserializeOwned>(entry: &Value) -> ClinicResult<T> {
    serde_json::from_value(entry.clone()).map_err(|err| ClinicError::Validation(err.to_string()))
}

fn collect<R>(response: &mut BulkResponse<Value, R>, entry: Value, result: ClinicResult<R>) {
    match result {
        Ok(created) => response.created.push(created),
        Err(err) => response.errors.push(BulkError {
            entity: entry,
            error: err.to_string(),
        }),
    }
}
