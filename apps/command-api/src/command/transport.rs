use std::time::Duration;

use async_trait::async_trait;
use odyssey_common::DroneCommand;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("drone did not answer in time")]
    Timeout,
    #[error("drone unreachable: {0}")]
    Unreachable(reqwest::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Unreachable(err)
        }
    }
}

/// What the drone answered. Any HTTP response counts as delivered.
#[derive(Debug, Clone)]
pub struct DroneReply {
    pub status: u16,
}

impl DroneReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The network hop from the command service to a drone.
#[async_trait]
pub trait DroneTransport: Send + Sync {
    async fn send(&self, address: &str, command: &DroneCommand) -> Result<DroneReply, TransportError>;
}

/// POSTs commands as JSON to `{address}/command`.
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl DroneTransport for HttpTransport {
    async fn send(&self, address: &str, command: &DroneCommand) -> Result<DroneReply, TransportError> {
        let url = format!("{}/command", address.trim_end_matches('/'));
        let resp = self.http.post(&url).json(command).send().await?;
        Ok(DroneReply {
            status: resp.status().as_u16(),
        })
    }
}
