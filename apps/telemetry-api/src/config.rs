use std::time::Duration;

/// Telemetry API configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Durable sink endpoint each sample is POSTed to.
    pub persistence_url: String,
    /// Per-request timeout against the durable sink.
    pub persistence_timeout: Duration,
    /// Number of forwarding workers draining the sink queue.
    pub forward_workers: usize,
    /// Samples buffered for the sink before new ones are dropped.
    pub forward_queue_capacity: usize,
    /// Frames buffered per dashboard before it is considered stalled.
    pub subscriber_queue_capacity: usize,
    /// Upper bound on a single WebSocket write to a dashboard.
    pub subscriber_write_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            persistence_url: "http://persistence-service:8082/log".to_string(),
            persistence_timeout: Duration::from_millis(2000),
            forward_workers: 4,
            forward_queue_capacity: 1024,
            subscriber_queue_capacity: 256,
            subscriber_write_timeout: Duration::from_millis(2000),
        }
    }
}

impl Config {
    /// Load configuration from environment variables. Every variable is
    /// optional; missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: parsed_var("PORT").unwrap_or(defaults.port),
            persistence_url: std::env::var("PERSISTENCE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.persistence_url),
            persistence_timeout: parsed_var("PERSISTENCE_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.persistence_timeout),
            forward_workers: parsed_var("FORWARD_WORKERS")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.forward_workers),
            forward_queue_capacity: parsed_var("FORWARD_QUEUE_CAPACITY")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.forward_queue_capacity),
            subscriber_queue_capacity: parsed_var("SUBSCRIBER_QUEUE_CAPACITY")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.subscriber_queue_capacity),
            subscriber_write_timeout: parsed_var("SUBSCRIBER_WRITE_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.subscriber_write_timeout),
        }
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
