//! Operator commands and drone registration payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Status string returned to the operator once a command reached the drone.
pub const COMMAND_SENT: &str = "Command sent to drone";

/// Recognized command verbs. The set is open: any verb is routable.
pub mod verbs {
    /// No-op liveness probe.
    pub const PING: &str = "PING";
    /// Fly back to the launch position.
    pub const RETURN_TO_BASE: &str = "RETURN_TO_BASE";
}

/// A drone announcing where it accepts commands.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub drone_id: String,
    /// Base URL, e.g. `http://drone-7:9000`.
    pub address: String,
}

/// A command issued by an operator, addressed by logical drone identity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommandRequest {
    pub drone_id: String,
    pub command: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub payload: Value,
}

impl CommandRequest {
    /// The body forwarded to the drone itself.
    pub fn to_drone_command(&self) -> DroneCommand {
        DroneCommand {
            command: self.command.clone(),
            payload: self.payload.clone(),
        }
    }
}

/// What a drone's `/command` endpoint receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DroneCommand {
    pub command: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub payload: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommandResponse {
    pub status: String,
    pub command: String,
}

impl CommandResponse {
    pub fn sent(command: &str) -> Self {
        Self {
            status: COMMAND_SENT.to_string(),
            command: command.to_string(),
        }
    }
}
