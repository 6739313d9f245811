use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::domain::Target;
use crate::error::AppResult;
use crate::metrics::RequestResult;

use super::client::build_client;

/// Performs one GET and folds its outcome into a [`RequestResult`].
///
/// Implementations never fail: transport errors become failed results.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, endpoint: &str) -> RequestResult;
}

/// Executes requests against one target over HTTP/1.1.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    base_url: Url,
    target: String,
}

impl HttpExecutor {
    /// # Errors
    ///
    /// Returns an error when the target URL, a header or the client is invalid.
    pub fn new(
        target: &Target,
        headers: &[(String, String)],
        user_agent: &str,
        timeout: Duration,
    ) -> AppResult<Self> {
        Ok(Self {
            client: build_client(&target.name, headers, user_agent, timeout)?,
            base_url: target.base_url()?,
            target: target.name.clone(),
        })
    }

    async fn fetch(&self, url: Url) -> Result<(u16, u64), reqwest::Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let bytes = drain_response_body(response).await?;
        Ok((status, bytes))
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, endpoint: &str) -> RequestResult {
        let started = Instant::now();
        let url = match self.base_url.join(endpoint) {
            Ok(url) => url,
            Err(err) => {
                return RequestResult::transport_failure(endpoint, started.elapsed(), err.to_string());
            }
        };

        match self.fetch(url).await {
            Ok((status, bytes)) => {
                let latency = started.elapsed();
                if !(200..300).contains(&status) {
                    debug!("{} {} returned status {}", self.target, endpoint, status);
                }
                RequestResult::from_response(endpoint, status, latency, bytes)
            }
            Err(err) => {
                let latency = started.elapsed();
                debug!("{} {} failed: {}", self.target, endpoint, err);
                RequestResult::transport_failure(endpoint, latency, err.to_string())
            }
        }
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
