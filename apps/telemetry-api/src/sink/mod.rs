//! Best-effort relay of samples toward durable storage.

pub mod forwarder;
pub mod store;

pub use forwarder::{ForwardingSink, ForwardingStats};
pub use store::{DurableStore, ForwardingError, HttpStore};
