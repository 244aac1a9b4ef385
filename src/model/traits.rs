use crate::error::FetchError;
use async_trait::async_trait;
use scraper::Html;
use std::time::Duration;

use super::snapshot::PartialMap;
use super::types::Page;

/// A fetched page body together with where it came from.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl RawPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport used to fetch Envoy pages.
///
/// Implementors return the page whatever its status; deciding what counts as
/// a failed response is left to the caller.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Issues a plain GET for `url`, giving up after `timeout`.
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<RawPage, FetchError>;
}

/// Turns one parsed page into a partial map.
///
/// Extraction is infallible from the caller's point of view: fields that do
/// not parse become Absent and structural problems are logged by the
/// implementor, which returns what it gathered so far.
pub trait PageExtractor: Send + Sync {
    /// The page this extractor understands.
    fn page(&self) -> Page;

    fn extract(&self, document: &Html) -> PartialMap;
}
