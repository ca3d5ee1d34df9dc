#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use odyssey_common::TelemetrySample;
use parking_lot::Mutex;
use tokio::time;

use telemetry_api::config::Config;
use telemetry_api::sink::{DurableStore, ForwardingError};
use telemetry_api::AppState;

/// In-memory durable store that records every insert.
pub struct RecordingStore {
    pub calls: AtomicUsize,
    pub samples: Mutex<Vec<TelemetrySample>>,
    fail: bool,
}

impl RecordingStore {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            samples: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    pub fn rejecting() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            samples: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DurableStore for RecordingStore {
    async fn insert(&self, sample: &TelemetrySample) -> Result<(), ForwardingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ForwardingError::Rejected(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            ));
        }
        self.samples.lock().push(sample.clone());
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        subscriber_queue_capacity: 64,
        subscriber_write_timeout: Duration::from_millis(500),
        forward_workers: 2,
        forward_queue_capacity: 64,
        ..Config::default()
    }
}

/// Build an [`AppState`] backed by the given store.
pub fn test_state(store: Arc<dyn DurableStore>) -> AppState {
    AppState::new(test_config(), store)
}

/// Build the full application router wired to a fresh state.
pub fn test_app(store: Arc<dyn DurableStore>) -> (Router, AppState) {
    let state = test_state(store);
    let app = telemetry_api::routes::router().with_state(state.clone());
    (app, state)
}

/// Start a real TCP server for WebSocket testing. The server runs in the
/// background for the rest of the test.
pub async fn start_server(store: Arc<dyn DurableStore>) -> (SocketAddr, AppState) {
    let (app, state) = test_app(store);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, state)
}

pub fn sample_json(drone_id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "droneId": drone_id,
        "timestamp": "2024-05-01T12:00:00.500+00:00",
        "latitude": 34.052235,
        "longitude": -118.243683,
        "altitude": 100.0,
        "batteryLevel": 0.87,
        "status": status
    })
}

/// Poll `check` until it holds or five seconds pass.
pub async fn eventually(mut check: impl FnMut() -> bool) {
    time::timeout(Duration::from_secs(5), async {
        while !check() {
            time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not reached within 5s");
}
