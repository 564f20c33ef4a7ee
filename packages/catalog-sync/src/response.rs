//! Outward-facing result payloads.
//!
//! The transport layer (Lambda function URL or MCP tool) serializes these
//! verbatim; errors never escape as panics or raw error types.

use serde::Serialize;

use crate::error::SyncError;

const DEFAULT_ERROR_MESSAGE: &str =
    "Could not process the sync request. Please try again later.";

/// Successful sync summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub message: String,
    /// Catalog rows written this invocation (header row not counted).
    pub rows_added: usize,
    /// Listings excluded by row validation.
    pub rows_dropped: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_page: Option<u32>,
    pub spreadsheet_title: String,
    /// Total rows in the destination sheet after the sync.
    pub row_count: usize,
}

/// Uniform result envelope handed to the transport layer.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SyncOutcome {
    Success {
        #[serde(flatten)]
        report: SyncReport,
    },
    Failure {
        message: String,
    },
}

impl SyncOutcome {
    /// Translate a sync result into the uniform envelope, appending the
    /// underlying error detail to the generic failure message.
    pub fn from_result(result: Result<SyncReport, SyncError>) -> Self {
        match result {
            Ok(report) => SyncOutcome::Success { report },
            Err(err) => SyncOutcome::Failure {
                message: format!("{DEFAULT_ERROR_MESSAGE} ({err})"),
            },
        }
    }
}
