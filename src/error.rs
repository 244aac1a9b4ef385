//! Error types for the Envoy forwarder.
//!
//! Fetch failures abort a refresh cycle, structural parse failures only degrade
//! a single page, and every aborted cycle is reported upward as [`UpdateFailed`].

use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = UpdateFailed> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures while fetching a page from the Envoy. All of them abort the cycle.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, DNS or body read failure
    #[error("error communicating with Envoy at {url}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The request did not complete within the configured timeout
    #[error("request to {url} timed out after {seconds} seconds")]
    Timeout { url: String, seconds: u64 },

    /// The Envoy answered with a non-success status
    #[error("error fetching {url}: HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Structural failures while scanning a parsed page.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Invalid CSS selector
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// Failed to parse a numeric value
    #[error("failed to parse number from '{text}': {message}")]
    NumberParse { text: String, message: String },

    /// A value carried none of the accepted unit suffixes
    #[error("unrecognized unit in '{0}'")]
    UnknownUnit(String),
}

/// Top-level failure of one refresh cycle, handed back to the scheduler.
#[derive(Error, Debug)]
pub enum UpdateFailed {
    /// A page could not be fetched; no snapshot was published
    #[error("update failed")]
    Fetch(#[from] FetchError),

    /// Extraction broke in an unexpected way
    #[error("error parsing Envoy data from {url}: {message}")]
    Extraction { url: String, message: String },
}

impl FetchError {
    /// Creates a transport error from any underlying cause.
    pub fn transport(url: impl Into<String>, err: impl Into<BoxError>) -> Self {
        Self::Transport {
            url: url.into(),
            source: err.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>, seconds: u64) -> Self {
        Self::Timeout {
            url: url.into(),
            seconds,
        }
    }

    /// Creates an HTTP status error.
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// The URL of the page that failed.
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Timeout { url, .. } | Self::Status { url, .. } => {
                url
            }
        }
    }
}

impl ParseError {
    /// Creates an invalid selector error.
    pub fn invalid_selector(selector: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: err.to_string(),
        }
    }

    /// Creates a number parse error.
    pub fn number_parse(text: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::NumberParse {
            text: text.into(),
            message: err.to_string(),
        }
    }
}

impl UpdateFailed {
    /// Creates an extraction failure for the page at `url`.
    pub fn extraction(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Renders the full cause chain as one human-readable line.
    pub fn reason(&self) -> String {
        let mut reason = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            reason.push_str(": ");
            reason.push_str(&err.to_string());
            source = err.source();
        }
        reason
    }
}
