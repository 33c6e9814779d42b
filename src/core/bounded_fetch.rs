//! Wall-clock bounds for outbound calls.
//!
//! The deadline runs alongside the wrapped future inside [`tokio::time::timeout`].
//! When the deadline wins, the call future is dropped, which cancels the
//! in-flight request. When the call wins, the timer is dropped with it.

use crate::utils::error::{ProxyError, Result};
use reqwest::{Client, Response};
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Runs `call` under a hard deadline, reporting `url` if it expires.
pub async fn deadline<F, T>(url: &str, timeout: Duration, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(url = %url, timeout_ms = timeout.as_millis() as u64, "Upstream call timed out");
            Err(ProxyError::Timeout {
                url: url.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })
        }
    }
}

/// Issues a GET for `url` and returns the response unmodified, or fails with
/// [`ProxyError::Timeout`] if headers have not arrived within `timeout`.
pub async fn bounded_fetch(client: &Client, url: &str, timeout: Duration) -> Result<Response> {
    deadline(url, timeout, async {
        client.get(url).send().await.map_err(ProxyError::from)
    })
    .await
}
