//! Drone identity → command endpoint directory.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use utoipa::ToSchema;

/// Last known command endpoint for a drone.
#[derive(Debug, Clone)]
pub struct DroneEndpoint {
    pub address: String,
    pub registered_at: DateTime<Utc>,
}

/// A directory row as exposed over the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub drone_id: String,
    pub address: String,
    pub registered_at: DateTime<Utc>,
}

/// Thread-safe, DashMap-backed directory.
///
/// Registration is an upsert: the newest address for an identity wins.
/// Entries are never expired; an address is trusted until a routed command
/// against it fails, and even then it stays until overwritten.
pub struct Directory {
    drones: DashMap<String, DroneEndpoint>,
}

impl Directory {
    pub fn new() -> Self {
        Self {
            drones: DashMap::new(),
        }
    }

    /// Record `address` for `drone_id`. Returns the address it replaced.
    pub fn register(&self, drone_id: &str, address: &str) -> Option<String> {
        let endpoint = DroneEndpoint {
            address: address.to_string(),
            registered_at: Utc::now(),
        };
        self.drones
            .insert(drone_id.to_string(), endpoint)
            .map(|previous| previous.address)
    }

    pub fn resolve(&self, drone_id: &str) -> Option<String> {
        self.drones.get(drone_id).map(|e| e.address.clone())
    }

    /// All entries, ordered by drone ID.
    pub fn list(&self) -> Vec<DirectoryEntry> {
        let mut entries: Vec<DirectoryEntry> = self
            .drones
            .iter()
            .map(|e| DirectoryEntry {
                drone_id: e.key().clone(),
                address: e.value().address.clone(),
                registered_at: e.value().registered_at,
            })
            .collect();
        entries.sort_by(|a, b| a.drone_id.cmp(&b.drone_id));
        entries
    }

    pub fn len(&self) -> usize {
        self.drones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drones.is_empty()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_unknown_is_none() {
        let directory = Directory::new();
        assert!(directory.resolve("d1").is_none());
    }

    #[test]
    fn register_then_resolve() {
        let directory = Directory::new();
        assert_eq!(directory.register("d1", "http://h:9000"), None);
        assert_eq!(directory.resolve("d1").as_deref(), Some("http://h:9000"));
    }

    #[test]
    fn last_registration_wins() {
        let directory = Directory::new();
        directory.register("d1", "http://a:9000");
        let replaced = directory.register("d1", "http://b:9000");

        assert_eq!(replaced.as_deref(), Some("http://a:9000"));
        assert_eq!(directory.resolve("d1").as_deref(), Some("http://b:9000"));
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn list_is_sorted() {
        let directory = Directory::new();
        directory.register("d2", "http://b:9000");
        directory.register("d1", "http://a:9000");

        let ids: Vec<String> = directory.list().into_iter().map(|e| e.drone_id).collect();
        assert_eq!(ids, vec!["d1", "d2"]);
    }
}
