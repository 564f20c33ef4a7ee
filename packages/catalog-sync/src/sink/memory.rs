//! In-memory catalog sink for tests and dry runs.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{CatalogSink, SheetInfo, SinkError};
use crate::feed::{CatalogRow, HEADERS};

#[derive(Debug, Clone, Default)]
struct Sheet {
    title: String,
    rows: Vec<Vec<String>>,
}

/// Sink that keeps every sheet in memory.
///
/// Sheets are created on first touch with a default title; call
/// [`MemorySink::with_sheet`] to pre-create one with a known title. Recorded
/// clear calls let tests assert on reset semantics.
#[derive(Default)]
pub struct MemorySink {
    sheets: Arc<RwLock<HashMap<String, Sheet>>>,
    clear_calls: Arc<RwLock<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-create a sheet with the given title (builder pattern).
    pub fn with_sheet(self, spreadsheet_id: &str, title: &str) -> Self {
        self.sheets.write().unwrap().insert(
            spreadsheet_id.to_string(),
            Sheet {
                title: title.to_string(),
                rows: Vec::new(),
            },
        );
        self
    }

    /// All stored rows of a sheet, header included.
    pub fn rows(&self, spreadsheet_id: &str) -> Vec<Vec<String>> {
        self.sheets
            .read()
            .unwrap()
            .get(spreadsheet_id)
            .map(|s| s.rows.clone())
            .unwrap_or_default()
    }

    /// Spreadsheet ids passed to `clear`, in call order.
    pub fn clear_calls(&self) -> Vec<String> {
        self.clear_calls.read().unwrap().clone()
    }
}

impl Clone for MemorySink {
    fn clone(&self) -> Self {
        Self {
            sheets: Arc::clone(&self.sheets),
            clear_calls: Arc::clone(&self.clear_calls),
        }
    }
}

const DEFAULT_TITLE: &str = "Untitled spreadsheet";

#[async_trait]
impl CatalogSink for MemorySink {
    async fn clear(&self, spreadsheet_id: &str) -> Result<(), SinkError> {
        self.clear_calls
            .write()
            .unwrap()
            .push(spreadsheet_id.to_string());

        let mut sheets = self.sheets.write().unwrap();
        let sheet = sheets.entry(spreadsheet_id.to_string()).or_insert_with(|| Sheet {
            title: DEFAULT_TITLE.to_string(),
            rows: Vec::new(),
        });
        sheet.rows.clear();
        Ok(())
    }

    async fn append(&self, spreadsheet_id: &str, rows: &[CatalogRow]) -> Result<(), SinkError> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut sheets = self.sheets.write().unwrap();
        let sheet = sheets.entry(spreadsheet_id.to_string()).or_insert_with(|| Sheet {
            title: DEFAULT_TITLE.to_string(),
            rows: Vec::new(),
        });

        if sheet.rows.is_empty() {
            sheet.rows.push(HEADERS.clone());
        }
        for row in rows {
            sheet.rows.push(row.cells());
        }
        Ok(())
    }

    async fn info(&self, spreadsheet_id: &str) -> Result<SheetInfo, SinkError> {
        let sheets = self.sheets.read().unwrap();
        let sheet = sheets.get(spreadsheet_id).cloned().unwrap_or_else(|| Sheet {
            title: DEFAULT_TITLE.to_string(),
            rows: Vec::new(),
        });
        Ok(SheetInfo {
            title: sheet.title,
            row_count: sheet.rows.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{Availability, CatalogRow};

    fn row(id: &str) -> CatalogRow {
        CatalogRow {
            home_listing_id: id.to_string(),
            name: "Casa".to_string(),
            description: String::new(),
            availability: Availability::ForSale,
            price: "100 MXN".to_string(),
            property_type: "house".to_string(),
            garden_type: String::new(),
            url: "https://example.com".to_string(),
            num_baths: None,
            num_beds: None,
            num_rooms: None,
            pet_policy: String::new(),
            area_size: None,
            land_area_size: None,
            parking_spaces: None,
            area_unit: "sq_m".to_string(),
            year_built: String::new(),
            addr1: String::new(),
            city: "CDMX".to_string(),
            region: "CDMX".to_string(),
            country: "Mexico".to_string(),
            neighborhood: "Roma".to_string(),
            virtual_tour_url: String::new(),
            images: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_append_writes_header_once() {
        let sink = MemorySink::new().with_sheet("sheet-1", "Feed");

        sink.append("sheet-1", &[row("EB-1")]).await.unwrap();
        sink.append("sheet-1", &[row("EB-2")]).await.unwrap();

        let rows = sink.rows("sheet-1");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], *HEADERS);
        assert_eq!(rows[1][0], "EB-1");
        assert_eq!(rows[2][0], "EB-2");
    }

    #[tokio::test]
    async fn test_clear_then_info() {
        let sink = MemorySink::new().with_sheet("sheet-1", "Feed");
        sink.append("sheet-1", &[row("EB-1")]).await.unwrap();

        sink.clear("sheet-1").await.unwrap();

        let info = sink.info("sheet-1").await.unwrap();
        assert_eq!(info.title, "Feed");
        assert_eq!(info.row_count, 0);
        assert_eq!(sink.clear_calls(), vec!["sheet-1".to_string()]);
    }
}
