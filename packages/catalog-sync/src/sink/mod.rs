//! The catalog sink boundary.
//!
//! The destination spreadsheet is an external collaborator; this trait is its
//! seam. The real Google Sheets client lives with the embedding host, while
//! [`MemorySink`] backs tests and dry runs.

pub mod memory;

pub use memory::MemorySink;

use async_trait::async_trait;
use thiserror::Error;

use crate::feed::CatalogRow;

/// Errors surfaced by a catalog sink implementation.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("spreadsheet backend error: {0}")]
    Backend(String),
}

/// Title and size of the destination sheet, echoed back in sync reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetInfo {
    pub title: String,
    /// Row count including the header row.
    pub row_count: usize,
}

/// Destination store for catalog rows.
#[async_trait]
pub trait CatalogSink: Send + Sync {
    /// Remove all rows (including the header) from the sheet.
    async fn clear(&self, spreadsheet_id: &str) -> Result<(), SinkError>;

    /// Append rows, writing a header row first when the sheet is empty.
    async fn append(&self, spreadsheet_id: &str, rows: &[CatalogRow]) -> Result<(), SinkError>;

    /// Title and current row count of the sheet.
    async fn info(&self, spreadsheet_id: &str) -> Result<SheetInfo, SinkError>;
}
