pub mod config;
pub mod error;
pub mod gateway;
pub mod ingest;
pub mod routes;
pub mod sink;

use std::sync::Arc;

use config::Config;
use gateway::fanout::BroadcastEngine;
use gateway::registry::SubscriberRegistry;
use sink::{DurableStore, ForwardingSink};

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub subscribers: Arc<SubscriberRegistry>,
    pub broadcast: Arc<BroadcastEngine>,
    pub sink: Arc<ForwardingSink>,
}

impl AppState {
    /// Wire the registry, fan-out engine and forwarding pool together.
    ///
    /// Spawns the forwarding workers, so it must run inside a Tokio runtime.
    pub fn new(config: Config, store: Arc<dyn DurableStore>) -> Self {
        let subscribers = Arc::new(SubscriberRegistry::new());
        let broadcast = Arc::new(BroadcastEngine::new(subscribers.clone()));
        let sink = Arc::new(ForwardingSink::spawn(
            store,
            config.forward_workers,
            config.forward_queue_capacity,
        ));

        Self {
            config: Arc::new(config),
            subscribers,
            broadcast,
            sink,
        }
    }
}
