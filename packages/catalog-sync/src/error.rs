//! Sync error taxonomy.
//!
//! Everything a sync invocation can fail with, flattened so the orchestration
//! boundary can translate any failure into the uniform response payload.
//! Nothing here is retried; every failure is terminal for its invocation.

use easybroker_client::EasyBrokerError;
use thiserror::Error;

use crate::sink::SinkError;

#[derive(Debug, Error)]
pub enum SyncError {
    /// A required request parameter was absent or empty.
    #[error("missing required parameter: {name}")]
    MissingParameter { name: &'static str },

    /// A filter value is not one of the accepted enum values.
    #[error("invalid value for {field}: {value:?}")]
    InvalidEnumValue { field: &'static str, value: String },

    /// Bounded fetch bounds violated the 1..=10-page-span rule.
    #[error("invalid page range {start}..={end}: pages start at 1 and the span is capped at 10 pages")]
    InvalidPageRange { start: u32, end: u32 },

    /// Exhaustive fetch ran out of wall-clock budget.
    #[error("query deadline exceeded after {pages_fetched} pages; narrow the status or property type filters")]
    QueryTimeout { pages_fetched: u32 },

    /// Source API failure, propagated without retry.
    #[error("upstream fetch failed: {0}")]
    Upstream(EasyBrokerError),

    /// Destination spreadsheet failure.
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    /// Catch-all for failures outside the taxonomy.
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl From<EasyBrokerError> for SyncError {
    /// Lift the page-range and timeout variants out of the client error so the
    /// taxonomy stays flat at the response boundary.
    fn from(err: EasyBrokerError) -> Self {
        match err {
            EasyBrokerError::InvalidPageRange { start, end } => {
                SyncError::InvalidPageRange { start, end }
            }
            EasyBrokerError::QueryTimeout { pages_fetched } => {
                SyncError::QueryTimeout { pages_fetched }
            }
            other => SyncError::Upstream(other),
        }
    }
}
