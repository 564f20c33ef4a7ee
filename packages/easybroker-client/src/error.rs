//! Typed errors for the EasyBroker client.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can match on
//! the failure mode. Nothing here is retried: transient transport errors
//! propagate to the caller unchanged.

use thiserror::Error;

/// Errors that can occur while talking to the EasyBroker API.
#[derive(Debug, Error)]
pub enum EasyBrokerError {
    /// Non-2xx response from the API, with the response body for diagnostics.
    #[error("EasyBroker API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure (connect, timeout, body read, decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Bounded fetch called with an invalid page range. Raised before any
    /// network request is issued.
    #[error("invalid page range {start}..={end}: pages start at 1 and the span is capped at {max_span} pages", max_span = crate::fetch::MAX_PAGE_SPAN)]
    InvalidPageRange { start: u32, end: u32 },

    /// Exhaustive fetch exceeded its wall-clock budget. Carries the number of
    /// pages processed before the deadline so the caller can narrow filters.
    #[error("query deadline exceeded after {pages_fetched} pages; narrow the status or property type filters")]
    QueryTimeout { pages_fetched: u32 },

    /// The server-supplied next-page link did not parse as a URL.
    #[error("invalid next-page link: {url}")]
    InvalidNextPage { url: String },
}

pub type Result<T> = std::result::Result<T, EasyBrokerError>;
