//! Fan-out of telemetry frames to every live dashboard.
//!
//! Each broadcast snapshots the registry and hands the encoded frame to every
//! subscriber's outbound queue with a non-blocking `try_send`. A subscriber
//! whose queue is full or closed is pruned, never retried, and never holds up
//! anyone else.

use std::sync::Arc;

use axum::extract::ws::Utf8Bytes;
use odyssey_common::TelemetrySample;
use parking_lot::Mutex;

use super::registry::SubscriberRegistry;

/// Outcome of one broadcast call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Subscribers whose queue accepted the frame.
    pub delivered: usize,
    /// Subscribers removed because the frame could not be queued.
    pub pruned: usize,
}

pub struct BroadcastEngine {
    registry: Arc<SubscriberRegistry>,
    /// Serializes snapshot + enqueue so that every subscriber sees frames in
    /// broadcast order. Held only for in-memory queue pushes.
    sequencer: Mutex<()>,
}

impl BroadcastEngine {
    pub fn new(registry: Arc<SubscriberRegistry>) -> Self {
        Self {
            registry,
            sequencer: Mutex::new(()),
        }
    }

    pub fn registry(&self) -> &Arc<SubscriberRegistry> {
        &self.registry
    }

    /// Encode `sample` once and fan it out.
    pub fn broadcast(&self, sample: &TelemetrySample) -> BroadcastReport {
        self.broadcast_frame(Utf8Bytes::from(sample.encode()))
    }

    /// Fan out an already-encoded frame. Every subscriber gets the same bytes.
    pub fn broadcast_frame(&self, frame: Utf8Bytes) -> BroadcastReport {
        let mut delivered = 0;
        let mut failed = Vec::new();

        {
            let _order = self.sequencer.lock();
            for conn in self.registry.snapshot() {
                match conn.enqueue(frame.clone()) {
                    Ok(()) => delivered += 1,
                    Err(e) => {
                        tracing::debug!(subscriber_id = %conn.id(), error = %e, "dropping subscriber");
                        failed.push(conn);
                    }
                }
            }
        }

        let pruned = failed
            .iter()
            .filter(|conn| self.registry.remove(conn.id()))
            .count();

        if pruned > 0 {
            tracing::warn!(pruned, delivered, "pruned unresponsive subscribers");
        }

        BroadcastReport { delivered, pruned }
    }
}
