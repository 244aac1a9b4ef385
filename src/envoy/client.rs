use crate::error::FetchError;
use crate::model::{PageFetcher, RawPage};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::time::Duration;

/// Plain HTTP access to the Envoy's local web server.
pub struct Client {
    http_client: HttpClient,
}

impl Client {
    pub fn new() -> Self {
        Self {
            http_client: HttpClient::new(),
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(url: &str, timeout: Duration, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::timeout(url, timeout.as_secs())
    } else {
        FetchError::transport(url, err)
    }
}

#[async_trait]
impl PageFetcher for Client {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<RawPage, FetchError> {
        let response = self
            .http_client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(url, timeout, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| classify(url, timeout, e))?;
        tracing::debug!(url, status, bytes = body.len(), "Fetched page");

        Ok(RawPage {
            url: url.to_string(),
            status,
            body,
        })
    }
}
