#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::Value;

use command_api::command::{DroneReply, DroneTransport, HttpTransport, TransportError};
use command_api::AppState;
use odyssey_common::DroneCommand;

/// Wraps another transport and counts outbound calls.
pub struct CountingTransport {
    inner: HttpTransport,
    calls: AtomicUsize,
}

impl CountingTransport {
    pub fn new(timeout: Duration) -> Arc<Self> {
        Arc::new(Self {
            inner: HttpTransport::new(timeout).expect("http client"),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DroneTransport for CountingTransport {
    async fn send(&self, address: &str, command: &DroneCommand) -> Result<DroneReply, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.send(address, command).await
    }
}

/// Build the full application router wired to a fresh state.
pub fn test_app(transport: Arc<dyn DroneTransport>) -> (Router, AppState) {
    let state = AppState::new(transport);
    let app = command_api::routes::router().with_state(state.clone());
    (app, state)
}

/// A stand-in drone exposing `POST /command`.
pub struct FakeDrone {
    pub addr: SocketAddr,
    pub received: Arc<Mutex<Vec<Value>>>,
}

impl FakeDrone {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn received(&self) -> Vec<Value> {
        self.received.lock().clone()
    }
}

/// Start a fake drone that answers every command with `status` after `delay`.
pub async fn start_fake_drone(status: StatusCode, delay: Duration) -> FakeDrone {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();

    let app = Router::new().route(
        "/command",
        post(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                sink.lock().push(body);
                tokio::time::sleep(delay).await;
                (status, Json(serde_json::json!({ "status": "ok" })))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeDrone { addr, received }
}
