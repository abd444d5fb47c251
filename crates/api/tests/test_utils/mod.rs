#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use medsync_api::{ApiState, build_router, config::ApiConfig};
use medsync_core::models::{
    appointment::CreateAppointmentRequest,
    party::{CreatePartyRequest, WindowRequest},
};
use medsync_core::store::ClinicStore;
use medsync_db::MemoryStore;

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub state: Arc<ApiState>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(ApiConfig::default())
    }

    pub fn with_config(config: ApiConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = Arc::new(ApiState::new(store.clone(), &config));
        Self { store, state }
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(build_router(self.state.clone())).unwrap()
    }
}

/// Builds state over any store, typically a `MockStore`.
pub fn state_with_store(store: impl ClinicStore + 'static) -> Arc<ApiState> {
    Arc::new(ApiState::new(Arc::new(store), &ApiConfig::default()))
}

pub fn party_request(id: i64, from: i64, to: i64) -> CreatePartyRequest {
    CreatePartyRequest {
        id,
        time: WindowRequest { from, to },
        name: None,
        birthday: None,
    }
}

pub fn appointment_request(id_patient: i64, id_doctor: i64, time: Option<i64>) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        id_patient,
        id_doctor,
        time,
    }
}
