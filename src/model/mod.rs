//! Data model for scraped Envoy metrics.
//!
//! Keys, values, partial maps and snapshots, plus the traits at the fetch and
//! extraction seams.

pub mod snapshot;
pub mod traits;
pub mod types;

pub use snapshot::{PartialMap, Snapshot};
pub use traits::{PageExtractor, PageFetcher, RawPage};
pub use types::{MetricKey, MetricValue, Page, Status, Unit};
