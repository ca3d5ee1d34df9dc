//! Entry point for decoded samples, plus the producer streaming endpoint.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use odyssey_common::id::{prefix, prefixed_ulid};
use odyssey_common::TelemetrySample;

use crate::gateway::fanout::BroadcastReport;
use crate::AppState;

/// Hand one sample to the live fan-out and the durable sink. The two paths
/// share nothing but the immutable sample; neither can fail the other.
pub fn dispatch(state: &AppState, sample: TelemetrySample) -> BroadcastReport {
    let sample = Arc::new(sample);
    let report = state.broadcast.broadcast(&sample);
    state.sink.forward(sample);
    report
}

pub fn router() -> Router<AppState> {
    Router::new().route("/ingest", get(stream_upgrade))
}

async fn stream_upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_stream(socket, state))
}

/// A long-lived producer stream: one sample per frame. A frame that fails to
/// decode is skipped and the stream carries on.
async fn handle_stream(mut socket: WebSocket, state: AppState) {
    let stream_id = prefixed_ulid(prefix::INGEST);
    tracing::info!(%stream_id, "producer stream established");

    let mut accepted: u64 = 0;
    let mut rejected: u64 = 0;

    while let Some(msg) = socket.recv().await {
        let decoded = match msg {
            Ok(Message::Text(text)) => TelemetrySample::decode(text.as_str().as_bytes()),
            Ok(Message::Binary(bytes)) => TelemetrySample::decode(&bytes),
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(?e, %stream_id, "producer stream read error");
                break;
            }
        };

        match decoded {
            Ok(sample) => {
                dispatch(&state, sample);
                accepted += 1;
            }
            Err(e) => {
                rejected += 1;
                tracing::warn!(%stream_id, error = %e, "skipping malformed sample");
            }
        }
    }

    tracing::info!(%stream_id, accepted, rejected, "producer stream closed");
}
