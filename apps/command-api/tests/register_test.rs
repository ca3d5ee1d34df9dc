//! Integration tests for drone registration and the directory listing.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;

#[tokio::test]
async fn register_adds_drone_to_directory() {
    let (app, state) = common::test_app(common::CountingTransport::new(Duration::from_secs(1)));
    let server = TestServer::new(app).unwrap();

    let resp = server
        .post("/api/register")
        .json(&serde_json::json!({ "droneId": "d1", "address": "http://h:9000/" }))
        .await;

    resp.assert_status_ok();
    assert_eq!(resp.json::<serde_json::Value>()["status"], "registered");
    // Trailing slash is normalized away.
    assert_eq!(state.directory.resolve("d1").as_deref(), Some("http://h:9000"));
}

#[tokio::test]
async fn list_drones_returns_latest_addresses() {
    let (app, _state) = common::test_app(common::CountingTransport::new(Duration::from_secs(1)));
    let server = TestServer::new(app).unwrap();

    for (id, address) in [
        ("d2", "http://b:9000"),
        ("d1", "http://a:9000"),
        ("d1", "http://c:9000"),
    ] {
        server
            .post("/api/register")
            .json(&serde_json::json!({ "droneId": id, "address": address }))
            .await
            .assert_status_ok();
    }

    let resp = server.get("/api/drones").await;
    resp.assert_status_ok();
    let body: serde_json::Value = resp.json();
    let drones = body.as_array().unwrap();
    assert_eq!(drones.len(), 2);
    assert_eq!(drones[0]["droneId"], "d1");
    assert_eq!(drones[0]["address"], "http://c:9000");
    assert!(drones[0]["registeredAt"].as_str().is_some());
    assert_eq!(drones[1]["droneId"], "d2");
}

#[tokio::test]
async fn register_rejects_invalid_fields() {
    let (app, state) = common::test_app(common::CountingTransport::new(Duration::from_secs(1)));
    let server = TestServer::new(app).unwrap();

    let resp = server
        .post("/api/register")
        .json(&serde_json::json!({ "droneId": " ", "address": "ftp://h" }))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["droneId", "address"]);
    assert!(state.directory.is_empty());
}

#[tokio::test]
async fn register_rejects_missing_fields() {
    let (app, _state) = common::test_app(common::CountingTransport::new(Duration::from_secs(1)));
    let server = TestServer::new(app).unwrap();

    let resp = server
        .post("/api/register")
        .json(&serde_json::json!({ "droneId": "d1" }))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<serde_json::Value>()["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn health_reports_directory_size() {
    let (app, state) = common::test_app(common::CountingTransport::new(Duration::from_secs(1)));
    state.directory.register("d1", "http://a:9000");
    let server = TestServer::new(app).unwrap();

    let resp = server.get("/health").await;
    resp.assert_status_ok();
    let body: serde_json::Value = resp.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["drones"], 1);
}
