pub mod command;
pub mod id;
pub mod telemetry;

pub use command::{CommandRequest, CommandResponse, DroneCommand, RegisterRequest};
pub use telemetry::{DecodeError, TelemetrySample};
