//! Dashboard WebSocket endpoint and per-connection lifecycle.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures_util::StreamExt;

use crate::AppState;

use super::connection::{run_writer, SubscriberConnection};

pub fn router() -> Router<AppState> {
    Router::new().route("/ws", get(ws_upgrade))
}

async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_connection(socket, state))
}

/// Register the socket as a subscriber, spawn its writer, and watch the read
/// side for the peer going away. Dashboards are receive-only; anything they
/// send other than a close is ignored.
async fn handle_connection(socket: WebSocket, state: AppState) {
    let (ws_tx, mut ws_rx) = socket.split();

    let (conn, outbox) = SubscriberConnection::new(state.config.subscriber_queue_capacity);
    let registry = state.subscribers.clone();
    let total = registry.add(conn.clone());
    tracing::info!(subscriber_id = %conn.id(), subscribers = total, "dashboard connected");

    let writer = tokio::spawn(run_writer(
        conn.clone(),
        outbox,
        ws_tx,
        registry.clone(),
        state.config.subscriber_write_timeout,
    ));

    loop {
        tokio::select! {
            _ = conn.closed() => break,
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(?e, subscriber_id = %conn.id(), "ws read error");
                        break;
                    }
                    Some(Ok(_)) => continue,
                }
            }
        }
    }

    registry.remove(conn.id());
    if let Err(e) = writer.await {
        tracing::error!(?e, subscriber_id = %conn.id(), "dashboard writer panicked");
    }

    tracing::info!(subscriber_id = %conn.id(), "dashboard disconnected");
}
