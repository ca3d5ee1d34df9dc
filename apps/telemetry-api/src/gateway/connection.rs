//! A single dashboard connection and its ordered outbound queue.
//!
//! Broadcasts never touch the socket directly. They push frames into the
//! connection's bounded queue and one writer task per connection drains it,
//! so frames reach the socket in the order they were enqueued and a slow
//! socket only ever blocks its own writer.

use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, Utf8Bytes};
use futures_util::{Sink, SinkExt};
use odyssey_common::id::{prefix, prefixed_ulid};
use tokio::sync::{mpsc, watch};
use tokio::time;

use super::registry::SubscriberRegistry;

/// Why a frame could not be handed to a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The outbound queue is full: the viewer is not keeping up.
    #[error("subscriber outbound queue is full")]
    Stalled,
    /// The connection was already removed or its writer has exited.
    #[error("subscriber connection is closed")]
    Closed,
}

/// Registry-owned handle for one live dashboard.
///
/// Starts `Active`; the first delivery failure, write failure or peer close
/// moves it to `Removed` for good. Reconnecting produces a fresh instance.
pub struct SubscriberConnection {
    id: String,
    outbound: mpsc::Sender<Utf8Bytes>,
    live: AtomicBool,
    shutdown: watch::Sender<bool>,
}

/// Receiving half of a connection's outbound queue. Owned by the writer.
pub struct Outbox {
    rx: mpsc::Receiver<Utf8Bytes>,
}

impl Outbox {
    pub async fn recv(&mut self) -> Option<Utf8Bytes> {
        self.rx.recv().await
    }

    /// Non-blocking receive, handy for draining in tests.
    pub fn try_recv(&mut self) -> Option<Utf8Bytes> {
        self.rx.try_recv().ok()
    }
}

impl SubscriberConnection {
    /// Create an `Active` connection with room for `capacity` queued frames.
    pub fn new(capacity: usize) -> (Arc<Self>, Outbox) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let (shutdown, _) = watch::channel(false);
        let conn = Arc::new(Self {
            id: prefixed_ulid(prefix::SUBSCRIBER),
            outbound: tx,
            live: AtomicBool::new(true),
            shutdown,
        });
        (conn, Outbox { rx })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Queue a frame without waiting. Never retried by the caller.
    pub fn enqueue(&self, frame: Utf8Bytes) -> Result<(), DeliveryError> {
        if !self.is_live() {
            return Err(DeliveryError::Closed);
        }
        self.outbound.try_send(frame).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => DeliveryError::Stalled,
            mpsc::error::TrySendError::Closed(_) => DeliveryError::Closed,
        })
    }

    /// Transition to `Removed` and tell the reader and writer to stop.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn close(&self) -> bool {
        if self.live.swap(false, Ordering::AcqRel) {
            self.shutdown.send_replace(true);
            true
        } else {
            false
        }
    }

    /// Resolves once [`close`](Self::close) has been called.
    pub async fn closed(&self) {
        let mut rx = self.shutdown.subscribe();
        // The sender lives in `self`, so this cannot observe a dropped channel.
        let _ = rx.wait_for(|closed| *closed).await;
    }
}

/// Drain `outbox` into `sink` in arrival order until the connection closes.
///
/// A failed or timed-out write removes the subscriber from `registry`; the
/// sink is closed on the way out in every case.
pub async fn run_writer<S>(
    conn: Arc<SubscriberConnection>,
    mut outbox: Outbox,
    mut sink: S,
    registry: Arc<SubscriberRegistry>,
    write_timeout: Duration,
) where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    loop {
        tokio::select! {
            _ = conn.closed() => break,
            frame = outbox.recv() => {
                let Some(frame) = frame else { break };
                match time::timeout(write_timeout, sink.send(Message::Text(frame))).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        tracing::debug!(subscriber_id = %conn.id(), error = %e, "dashboard write failed");
                        break;
                    }
                    Err(_elapsed) => {
                        tracing::warn!(
                            subscriber_id = %conn.id(),
                            timeout_ms = write_timeout.as_millis() as u64,
                            "dashboard write timed out"
                        );
                        break;
                    }
                }
            }
        }
    }

    registry.remove(conn.id());
    let _ = time::timeout(write_timeout, sink.close()).await;
}
