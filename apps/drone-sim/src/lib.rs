pub mod config;
pub mod flight;
pub mod reporter;
pub mod routes;

use std::sync::Arc;

use parking_lot::Mutex;

use config::Config;
use flight::DroneState;

/// Shared between the command server and the telemetry loop.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub drone: Arc<Mutex<DroneState>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            drone: Arc::new(Mutex::new(DroneState::default())),
        }
    }
}
