//! Transport
//!
//! The session client only needs a `send(request) -> response`
//! collaborator; everything else about the network (retries, TLS,
//! proxies) is out of scope. The trait seam exists so tests can swap
//! in a scripted backend.

use async_trait::async_trait;

use crate::config::AgentConfig;
use crate::error::TransportError;
use crate::protocol::{TalkRequest, TalkResponse};

/// One-request-per-turn exchange with the agent backend.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &TalkRequest) -> Result<TalkResponse, TransportError>;
}

/// HTTP transport: a JSON POST per turn.
pub struct HttpTransport {
    endpoint: String,
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: AgentConfig) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            endpoint: config.endpoint,
            http_client,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &TalkRequest) -> Result<TalkResponse, TransportError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(TransportError::Decode)
    }
}
