use std::time::Duration;

use odyssey_common::id::{prefix, prefixed_ulid};

/// Simulator configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Identity reported in every sample. Random when unset.
    pub drone_id: String,
    /// Port the `/command` server binds to.
    pub port: u16,
    /// Where samples are POSTed.
    pub telemetry_url: String,
    /// Command service base URL used for self-registration.
    pub command_api_url: String,
    /// Base URL the command service should use to reach this drone.
    pub advertise_address: String,
    /// Pause between samples.
    pub telemetry_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(9000);
        Self {
            drone_id: optional_var("DRONE_ID").unwrap_or_else(|| prefixed_ulid(prefix::DRONE)),
            port,
            telemetry_url: optional_var("TELEMETRY_URL")
                .unwrap_or_else(|| "http://localhost:8080/telemetry".to_string()),
            command_api_url: optional_var("COMMAND_API_URL")
                .unwrap_or_else(|| "http://localhost:8081".to_string()),
            advertise_address: optional_var("ADVERTISE_ADDRESS")
                .unwrap_or_else(|| format!("http://localhost:{port}")),
            telemetry_interval: std::env::var("TELEMETRY_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(Duration::from_secs(2)),
        }
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
