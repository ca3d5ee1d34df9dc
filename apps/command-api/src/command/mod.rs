//! Routing operator commands to drones by logical identity.

pub mod router;
pub mod transport;

pub use router::{CommandRouter, RouteError, Routed};
pub use transport::{DroneReply, DroneTransport, HttpTransport, TransportError};
