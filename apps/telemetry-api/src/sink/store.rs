use std::time::Duration;

use async_trait::async_trait;
use odyssey_common::TelemetrySample;
use reqwest::StatusCode;

/// Why a sample did not make it into the durable store.
#[derive(Debug, thiserror::Error)]
pub enum ForwardingError {
    #[error("durable store unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),
    #[error("durable store rejected sample with status {0}")]
    Rejected(StatusCode),
}

/// Where persisted samples go. Queue publishers and HTTP endpoints are
/// equally valid bindings; the core only needs a single insert call.
#[async_trait]
pub trait DurableStore: Send + Sync {
    async fn insert(&self, sample: &TelemetrySample) -> Result<(), ForwardingError>;
}

// ---------------------------------------------------------------------------
// HTTP binding (persistence service `POST /log`)
// ---------------------------------------------------------------------------

pub struct HttpStore {
    url: String,
    http: reqwest::Client,
}

impl HttpStore {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.to_string(),
            http,
        })
    }
}

#[async_trait]
impl DurableStore for HttpStore {
    async fn insert(&self, sample: &TelemetrySample) -> Result<(), ForwardingError> {
        let resp = self.http.post(&self.url).json(sample).send().await?;
        match resp.status() {
            StatusCode::CREATED | StatusCode::ACCEPTED => Ok(()),
            status => Err(ForwardingError::Rejected(status)),
        }
    }
}
