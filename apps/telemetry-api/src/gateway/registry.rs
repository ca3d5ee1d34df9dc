//! The set of live dashboard connections.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::connection::SubscriberConnection;

/// Shared registry of every live dashboard.
///
/// Reads (broadcast snapshots) vastly outnumber writes (connect/disconnect),
/// hence a reader-writer lock. The lock only ever guards a map operation;
/// nothing network-bound runs while it is held.
pub struct SubscriberRegistry {
    connections: RwLock<HashMap<String, Arc<SubscriberConnection>>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a connection. Returns the number of live subscribers afterwards.
    pub fn add(&self, conn: Arc<SubscriberConnection>) -> usize {
        let mut connections = self.connections.write();
        connections.insert(conn.id().to_string(), conn);
        connections.len()
    }

    /// Remove a connection and close it. Safe to call repeatedly and from
    /// several tasks at once; only the first call has any effect.
    pub fn remove(&self, id: &str) -> bool {
        let (removed, remaining) = {
            let mut connections = self.connections.write();
            let removed = connections.remove(id);
            (removed, connections.len())
        };

        match removed {
            Some(conn) => {
                conn.close();
                tracing::info!(subscriber_id = %id, subscribers = remaining, "subscriber removed");
                true
            }
            None => false,
        }
    }

    /// Copy of the current live set, for iteration outside the lock.
    pub fn snapshot(&self) -> Vec<Arc<SubscriberConnection>> {
        self.connections.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.connections.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}
