//! Mock fetchers and extractors for exercising the coordinator without a
//! network.

use crate::error::FetchError;
use crate::model::{Page, PageExtractor, PageFetcher, PartialMap, RawPage};
use async_trait::async_trait;
use scraper::Html;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Canned outcome for one URL.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Page { status: u16, body: String },
    Transport(String),
    Timeout,
}

impl MockResponse {
    pub fn page(status: u16, body: &str) -> Self {
        Self::Page {
            status,
            body: body.to_string(),
        }
    }

    pub fn transport(message: &str) -> Self {
        Self::Transport(message.to_string())
    }
}

/// A fetcher serving canned responses by URL and recording every call.
///
/// Unknown URLs answer 404.
#[derive(Default)]
pub struct MockFetcher {
    responses: Mutex<HashMap<String, MockResponse>>,
    calls: Mutex<Vec<(String, Duration)>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, status: u16, body: &str) -> Self {
        self.with_response(url, MockResponse::page(status, body))
    }

    pub fn with_response(self, url: &str, response: MockResponse) -> Self {
        self.set_response(url, response);
        self
    }

    /// Replaces the response for `url`, e.g. between two refresh cycles.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), response);
    }

    /// URLs fetched so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub fn last_timeout(&self) -> Option<Duration> {
        self.calls.lock().unwrap().last().map(|(_, timeout)| *timeout)
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<RawPage, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), timeout));

        let response = self
            .responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| MockResponse::page(404, "Not Found"));

        match response {
            MockResponse::Page { status, body } => Ok(RawPage {
                url: url.to_string(),
                status,
                body,
            }),
            MockResponse::Transport(message) => Err(FetchError::transport(
                url,
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, message),
            )),
            MockResponse::Timeout => Err(FetchError::timeout(url, timeout.as_secs())),
        }
    }
}

/// An extractor that panics, standing in for an unexpected failure while
/// scanning a page.
pub struct PanickingExtractor {
    page: Page,
    message: &'static str,
}

impl PanickingExtractor {
    pub fn new(page: Page, message: &'static str) -> Self {
        Self { page, message }
    }
}

impl PageExtractor for PanickingExtractor {
    fn page(&self) -> Page {
        self.page
    }

    fn extract(&self, _document: &Html) -> PartialMap {
        panic!("{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fetcher_serves_and_records() {
        let fetcher = MockFetcher::new().with_page("http://envoy.local/home", 200, "ok");

        let page = fetcher
            .fetch("http://envoy.local/home", Duration::from_secs(3))
            .await
            .unwrap();

        assert_eq!(page.body, "ok");
        assert_eq!(fetcher.calls(), vec!["http://envoy.local/home"]);
        assert_eq!(fetcher.last_timeout(), Some(Duration::from_secs(3)));
    }

    #[tokio::test]
    async fn test_mock_fetcher_unknown_url_is_404() {
        let fetcher = MockFetcher::new();

        let page = fetcher
            .fetch("http://envoy.local/other", Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(page.status, 404);
    }
}
