use std::time::Duration;

/// Command API configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Upper bound on a proxied call to a drone.
    pub drone_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8081,
            drone_timeout: Duration::from_secs(5),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything missing or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            drone_timeout: std::env::var("DRONE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.drone_timeout),
        }
    }
}
