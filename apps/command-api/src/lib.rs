pub mod command;
pub mod config;
pub mod directory;
pub mod error;
pub mod routes;

use std::sync::Arc;

use command::{CommandRouter, DroneTransport};
use directory::Directory;

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<Directory>,
    pub router: Arc<CommandRouter>,
}

impl AppState {
    pub fn new(transport: Arc<dyn DroneTransport>) -> Self {
        let directory = Arc::new(Directory::new());
        let router = Arc::new(CommandRouter::new(directory.clone(), transport));
        Self {
            directory,
            router,
        }
    }
}
