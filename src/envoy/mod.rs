//! Envoy gateway access: HTTP client, page extractors and the refresh
//! coordinator.

mod client;
mod coordinator;
mod helper;
mod html_parsing;
mod parsers;

pub use client::Client;
pub use coordinator::{Coordinator, SnapshotReceiver};
