mod test_utils;

use axum::http::StatusCode;
use medsync_core::models::{
    appointment::{Appointment, ApproveResponse, ClearResponse, ScheduleSnapshot},
    party::Party,
    status::Status,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use test_utils::TestContext;

#[tokio::test]
async fn test_health_and_version() {
    let server = TestContext::new().server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok", "subscribers": 0 }));

    let response = server.get("/version").await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["version"],
        env!("CARGO_PKG_VERSION")
    );
}

#[tokio::test]
async fn test_register_party_echoes_wire_format() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/doctors")
        .json(&json!({
            "id": 1,
            "time": { "from": 9, "to": 17 },
            "name": "Gregory House",
            "birthday": "1959-06-11"
        }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "id": 1,
        "time": { "from": 9, "to": 17 },
        "name": "Gregory House",
        "birthday": "1959-06-11"
    }));
}

#[tokio::test]
async fn test_invalid_party_is_a_bad_request() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/patients")
        .json(&json!({ "id": 1, "time": { "from": 10, "to": 10 } }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(
        response.json::<Value>()["error"]
            .as_str()
            .unwrap()
            .starts_with("Validation error")
    );
}

#[tokio::test]
async fn test_duplicate_party_is_a_conflict() {
    let server = TestContext::new().server();
    let body = json!({ "id": 4, "time": { "from": 9, "to": 10 } });

    server.post("/api/patients").json(&body).await.assert_status_ok();
    server
        .post("/api/patients")
        .json(&body)
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_patient_is_not_found() {
    let server = TestContext::new().server();
    server
        .post("/api/doctors")
        .json(&json!({ "id": 1, "time": { "from": 9, "to": 12 } }))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/appointments")
        .json(&json!({ "idPatient": 5, "idDoctor": 1, "time": 9 }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({
        "error": "Resource not found: Patient with ID 5 not found"
    }));
}

#[tokio::test]
async fn test_booking_round_trip() {
    let server = TestContext::new().server();

    let doctors = server
        .post("/api/doctors/bulk")
        .json(&json!([{ "id": 1, "time": { "from": 10, "to": 12 } }]))
        .await;
    doctors.assert_status_ok();
    assert_eq!(doctors.json::<Value>()["doctors"].as_array().unwrap().len(), 1);

    let patients = server
        .post("/api/patients/bulk")
        .json(&json!([
            { "id": 1, "time": { "from": 0, "to": 24 } },
            { "id": 2, "time": { "from": 0, "to": 24 } },
            { "id": 3, "time": { "from": 0, "to": 25 } }
        ]))
        .await;
    patients.assert_status_ok();
    let patients = patients.json::<Value>();
    assert_eq!(patients["patients"].as_array().unwrap().len(), 2);
    assert_eq!(patients["errors"][0]["entity"]["id"], 3);

    let created = server
        .post("/api/appointments")
        .json(&json!({ "idPatient": 1, "idDoctor": 1, "time": 10 }))
        .await;
    created.assert_status_ok();
    assert_eq!(created.json::<Appointment>().status, Status::Green);

    let bulk = server
        .post("/api/appointments/bulk")
        .json(&json!([{ "idPatient": 2, "idDoctor": 1, "time": 10 }]))
        .await;
    bulk.assert_status_ok();
    assert_eq!(
        bulk.json::<Value>(),
        json!({
            "errors": [],
            "appointments": [{ "idPatient": 2, "idDoctor": 1, "time": 10, "status": "YELLOW" }]
        })
    );

    let snapshot = server.get("/api/appointments").await.json::<ScheduleSnapshot>();
    assert_eq!(
        snapshot.resolved_schedule,
        vec![
            Appointment {
                id_patient: 1,
                id_doctor: 1,
                time: Some(10),
                status: Status::Green,
            },
            Appointment {
                id_patient: 2,
                id_doctor: 1,
                time: Some(11),
                status: Status::Blue,
            },
        ]
    );

    let approve = server.patch("/api/appointments").await;
    approve.assert_status_ok();
    assert_eq!(approve.json::<ApproveResponse>(), ApproveResponse { committed: true });

    let snapshot = server.get("/api/appointments").await.json::<ScheduleSnapshot>();
    assert!(snapshot.appointments.iter().all(|a| a.status == Status::Green));

    let cleared = server.delete("/api/appointments").await;
    cleared.assert_status_ok();
    assert_eq!(cleared.json::<ClearResponse>(), ClearResponse { deleted_count: 5 });

    let snapshot = server.get("/api/appointments").await.json::<ScheduleSnapshot>();
    assert_eq!(snapshot, ScheduleSnapshot::default());
}

#[tokio::test]
async fn test_request_without_hour_is_accepted() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/appointments")
        .json(&json!({ "idPatient": 1, "idDoctor": 1 }))
        .await;

    // No hour means no lookup: the request is stored RED and the engine
    // leaves it RED while its parties are unknown
    response.assert_status_ok();
    assert_eq!(response.json::<Appointment>().status, Status::Red);

    let snapshot = server.get("/api/appointments").await.json::<ScheduleSnapshot>();
    assert_eq!(snapshot.resolved_schedule.len(), 1);
    assert_eq!(snapshot.resolved_schedule[0].status, Status::Red);

    let registered = server
        .post("/api/doctors")
        .json(&json!({ "id": 1, "time": { "from": 9, "to": 10 } }))
        .await
        .json::<Party>();
    assert_eq!(registered.id, 1);
}
