use std::sync::Arc;

use odyssey_common::CommandRequest;

use super::transport::{DroneReply, DroneTransport, TransportError};
use crate::directory::Directory;

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The target never registered. No network call was made.
    #[error("drone {0} is not registered")]
    NotRegistered(String),
    /// The target is registered but the call to it failed or timed out.
    #[error("failed to reach drone {drone_id} at {address}: {source}")]
    Gateway {
        drone_id: String,
        address: String,
        #[source]
        source: TransportError,
    },
}

/// A command that reached its drone.
#[derive(Debug, Clone)]
pub struct Routed {
    pub drone_id: String,
    pub address: String,
    pub reply: DroneReply,
}

/// Resolves a command's target through the [`Directory`] and proxies it.
///
/// One attempt per call; retrying is the operator's decision. Routing never
/// modifies the directory.
pub struct CommandRouter {
    directory: Arc<Directory>,
    transport: Arc<dyn DroneTransport>,
}

impl CommandRouter {
    pub fn new(directory: Arc<Directory>, transport: Arc<dyn DroneTransport>) -> Self {
        Self {
            directory,
            transport,
        }
    }

    pub async fn route(&self, request: &CommandRequest) -> Result<Routed, RouteError> {
        let Some(address) = self.directory.resolve(&request.drone_id) else {
            tracing::warn!(drone_id = %request.drone_id, "drone not found in directory");
            return Err(RouteError::NotRegistered(request.drone_id.clone()));
        };

        let command = request.to_drone_command();
        match self.transport.send(&address, &command).await {
            Ok(reply) => {
                if reply.is_success() {
                    tracing::info!(
                        drone_id = %request.drone_id,
                        command = %request.command,
                        %address,
                        "command delivered"
                    );
                } else {
                    tracing::warn!(
                        drone_id = %request.drone_id,
                        command = %request.command,
                        %address,
                        status = reply.status,
                        "drone answered with non-success status"
                    );
                }
                Ok(Routed {
                    drone_id: request.drone_id.clone(),
                    address,
                    reply,
                })
            }
            Err(source) => {
                tracing::error!(
                    drone_id = %request.drone_id,
                    command = %request.command,
                    %address,
                    error = %source,
                    "failed to forward command"
                );
                Err(RouteError::Gateway {
                    drone_id: request.drone_id.clone(),
                    address,
                    source,
                })
            }
        }
    }
}
