//! Refresh orchestration for the Envoy pages.
//!
//! One cycle fetches `/home` then `/production`, extracts each into a partial
//! map, merges them and swaps the result in as the latest snapshot. A failed
//! fetch aborts the whole cycle and leaves the previous snapshot in place.

use chrono::Local;
use scraper::Html;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};

use crate::config::EnvoyConfig;
use crate::envoy::parsers::{HomePageExtractor, ProductionPageExtractor};
use crate::error::{FetchError, Result, UpdateFailed};
use crate::model::{
    MetricKey, MetricValue, Page, PageExtractor, PageFetcher, PartialMap, RawPage, Snapshot,
};

/// Latest snapshot as seen by readers; `None` until the first successful cycle.
pub type SnapshotReceiver = watch::Receiver<Option<Arc<Snapshot>>>;

pub struct Coordinator {
    fetcher: Arc<dyn PageFetcher>,
    extractors: Vec<Box<dyn PageExtractor>>,
    base_url: String,
    request_timeout: Duration,
    cycle: Mutex<()>,
    latest: watch::Sender<Option<Arc<Snapshot>>>,
}

impl Coordinator {
    /// Creates a coordinator scraping the home and production pages, in that order.
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &EnvoyConfig) -> Self {
        Self::with_extractors(
            fetcher,
            config,
            vec![
                Box::new(HomePageExtractor),
                Box::new(ProductionPageExtractor),
            ],
        )
    }

    pub fn with_extractors(
        fetcher: Arc<dyn PageFetcher>,
        config: &EnvoyConfig,
        extractors: Vec<Box<dyn PageExtractor>>,
    ) -> Self {
        let (latest, _) = watch::channel(None);
        Self {
            fetcher,
            extractors,
            base_url: config.base_url(),
            request_timeout: config.request_timeout(),
            cycle: Mutex::new(()),
            latest,
        }
    }

    /// Runs one fetch-extract-merge cycle and publishes the result.
    ///
    /// Cycles never overlap: a concurrent call waits for the running one.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>> {
        let _cycle = self.cycle.lock().await;

        let mut partials = Vec::with_capacity(self.extractors.len());
        for extractor in &self.extractors {
            let page = self
                .fetch_page(extractor.page())
                .await
                .inspect_err(|err| tracing::warn!(url = err.url(), "Envoy page fetch failed"))?;
            partials.push(extract_page(extractor.as_ref(), &page)?);
        }

        let snapshot = Arc::new(Snapshot::merge(partials, Local::now()));
        self.latest.send_replace(Some(Arc::clone(&snapshot)));
        tracing::info!(
            metrics = snapshot.len(),
            absent = snapshot.iter().filter(|(_, value)| value.is_absent()).count(),
            "Refreshed Envoy snapshot"
        );

        Ok(snapshot)
    }

    async fn fetch_page(&self, page: Page) -> Result<RawPage, FetchError> {
        let url = format!("{}{}", self.base_url, page.path());
        let raw = self.fetcher.fetch(&url, self.request_timeout).await?;
        if !raw.is_success() {
            return Err(FetchError::status(url, raw.status));
        }
        Ok(raw)
    }

    /// Reads one metric from the last successful snapshot.
    pub fn get(&self, key: MetricKey) -> MetricValue {
        self.latest
            .borrow()
            .as_ref()
            .map(|snapshot| snapshot.get(key))
            .unwrap_or_default()
    }

    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.latest.borrow().clone()
    }

    /// Subscribes to snapshot replacements.
    pub fn subscribe(&self) -> SnapshotReceiver {
        self.latest.subscribe()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Parses and extracts one page. A panic inside the extractor is turned into
/// an [`UpdateFailed::Extraction`] instead of unwinding through the cycle.
fn extract_page(extractor: &dyn PageExtractor, page: &RawPage) -> Result<PartialMap> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        let document = Html::parse_document(&page.body);
        extractor.extract(&document)
    }))
    .map_err(|payload| UpdateFailed::extraction(&page.url, panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "extractor panicked".to_string()
    }
}
