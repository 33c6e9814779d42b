use crate::core::bounded_fetch::deadline;
use crate::domain::ports::Upstream;
use crate::utils::error::{ProxyError, Result};
use reqwest::{Client, Response};
use std::time::Duration;

/// [`Upstream`] over HTTP. With a timeout set, one deadline covers the request,
/// the status check and the body read.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpUpstream {
    pub fn new(timeout_ms: Option<u64>) -> Self {
        Self::with_client(Client::new(), timeout_ms)
    }

    pub fn with_client(client: Client, timeout_ms: Option<u64>) -> Self {
        Self {
            client,
            timeout: timeout_ms.map(Duration::from_millis),
        }
    }
}

impl Upstream for HttpUpstream {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        tracing::debug!("Making upstream request to: {}", url);

        match self.timeout {
            Some(timeout) => deadline(url, timeout, self.fetch(url)).await,
            None => self.fetch(url).await,
        }
    }
}

impl HttpUpstream {
    async fn fetch(&self, url: &str) -> Result<serde_json::Value> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("Upstream response status: {} ({})", status, url);

        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "Upstream returned non-success status");
            return Err(ProxyError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        read_json(url, response).await
    }
}

async fn read_json(url: &str, response: Response) -> Result<serde_json::Value> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ProxyError::malformed(url, e.to_string()))
}
