//! Shared test utilities for the Envoy forwarder.
//!
//! HTML fixtures and builders, mock fetchers/extractors and test configs used
//! across module tests.

#![cfg(test)]

pub mod config;
pub mod fixtures;
pub mod html;
pub mod mocks;
