use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::api::paths;
use crate::error::Result;
use crate::transport_error;

/// Outbound half of the gossip protocol
#[async_trait]
pub trait PeerTransport: Send + Sync {
    /// Deliver an encoded membership view to `peer`
    async fn push(&self, peer: &str, payload: Vec<u8>) -> Result<()>;
}

/// Pushes membership views to `http://<peer>/gossip`
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PeerTransport for HttpTransport {
    async fn push(&self, peer: &str, payload: Vec<u8>) -> Result<()> {
        let url = paths::gossip_url(peer);
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| transport_error!("POST {} failed: {}", url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(transport_error!("POST {} rejected with {}", url, status));
        }
        debug!("Pushed membership view to {} ({})", peer, status);
        Ok(())
    }
}
