//! Bounded worker pool feeding the durable store.
//!
//! `forward` only ever pushes onto a bounded queue; a fixed number of workers
//! drain it. When the queue is full the newest sample is dropped and counted.
//! Failures are logged and counted, never returned to the caller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use odyssey_common::TelemetrySample;
use serde::Serialize;
use tokio::sync::{mpsc, Mutex};
use utoipa::ToSchema;

use super::store::DurableStore;

/// Point-in-time forwarding counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ForwardingStats {
    /// Samples the store acknowledged.
    pub forwarded: u64,
    /// Samples the store rejected or could not be reached for.
    pub failed: u64,
    /// Samples discarded because the queue was full or shut down.
    pub dropped: u64,
}

#[derive(Default)]
struct Counters {
    forwarded: AtomicU64,
    failed: AtomicU64,
    dropped: AtomicU64,
}

pub struct ForwardingSink {
    queue: mpsc::Sender<Arc<TelemetrySample>>,
    counters: Arc<Counters>,
}

impl ForwardingSink {
    /// Start `workers` forwarding tasks sharing a queue of `capacity` samples.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(store: Arc<dyn DurableStore>, workers: usize, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let rx = Arc::new(Mutex::new(rx));
        let counters = Arc::new(Counters::default());

        for worker in 0..workers.max(1) {
            tokio::spawn(run_worker(worker, rx.clone(), store.clone(), counters.clone()));
        }

        Self { queue: tx, counters }
    }

    /// Hand a sample to the pool. Returns `false` if it was dropped.
    pub fn forward(&self, sample: Arc<TelemetrySample>) -> bool {
        match self.queue.try_send(sample) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(sample)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(drone_id = %sample.drone_id, "forwarding queue full, dropping sample");
                false
            }
            Err(mpsc::error::TrySendError::Closed(sample)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::error!(drone_id = %sample.drone_id, "forwarding workers gone, dropping sample");
                false
            }
        }
    }

    pub fn stats(&self) -> ForwardingStats {
        ForwardingStats {
            forwarded: self.counters.forwarded.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
        }
    }
}

async fn run_worker(
    worker: usize,
    rx: Arc<Mutex<mpsc::Receiver<Arc<TelemetrySample>>>>,
    store: Arc<dyn DurableStore>,
    counters: Arc<Counters>,
) {
    loop {
        // Only the receive happens under the lock; inserts run in parallel.
        let next = rx.lock().await.recv().await;
        let Some(sample) = next else { break };

        match store.insert(&sample).await {
            Ok(()) => {
                counters.forwarded.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(worker, drone_id = %sample.drone_id, error = %e, "forwarding failed");
            }
        }
    }
    tracing::debug!(worker, "forwarding worker stopped");
}
