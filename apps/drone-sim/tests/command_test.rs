use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;

use drone_sim::config::Config;
use drone_sim::flight::FlightStatus;
use drone_sim::AppState;

fn test_app() -> (TestServer, AppState) {
    let config = Config {
        drone_id: "d1".to_string(),
        port: 0,
        telemetry_url: "http://127.0.0.1:9/telemetry".to_string(),
        command_api_url: "http://127.0.0.1:9".to_string(),
        advertise_address: "http://127.0.0.1:9000".to_string(),
        telemetry_interval: Duration::from_secs(2),
    };
    let state = AppState::new(config);
    let app = drone_sim::routes::router().with_state(state.clone());
    (TestServer::new(app).unwrap(), state)
}

#[tokio::test]
async fn return_to_base_changes_status() {
    let (server, state) = test_app();

    let resp = server
        .post("/command")
        .json(&serde_json::json!({ "command": "RETURN_TO_BASE", "payload": {} }))
        .await;

    resp.assert_status_ok();
    let body: serde_json::Value = resp.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(state.drone.lock().status, FlightStatus::ReturningToBase);

    let health: serde_json::Value = server.get("/health").await.json();
    assert_eq!(health["state"], "returning_to_base");
    assert_eq!(health["droneId"], "d1");
}

#[tokio::test]
async fn ping_leaves_state_untouched() {
    let (server, state) = test_app();

    let resp = server
        .post("/command")
        .json(&serde_json::json!({ "command": "PING" }))
        .await;

    resp.assert_status_ok();
    assert_eq!(state.drone.lock().status, FlightStatus::Idle);
}

#[tokio::test]
async fn unknown_command_is_rejected() {
    let (server, _state) = test_app();

    let resp = server
        .post("/command")
        .json(&serde_json::json!({ "command": "DANCE" }))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Unknown command");
}

#[tokio::test]
async fn missing_command_is_rejected() {
    let (server, _state) = test_app();

    let resp = server
        .post("/command")
        .json(&serde_json::json!({ "payload": {} }))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.json::<serde_json::Value>()["message"],
        "Invalid command payload"
    );
}

#[tokio::test]
async fn registration_failure_is_reported() {
    let (_server, state) = test_app();
    let client = reqwest::Client::new();

    // Nothing listens on the discard port.
    assert!(drone_sim::reporter::register(&client, &state).await.is_err());
}
