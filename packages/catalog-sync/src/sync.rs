//! Sync orchestration: fetch, fan out details, format, write.
//!
//! Thin sequencing over the fetch strategies, the formatter, and the sink.
//! No state survives an invocation, and partial progress is never rolled
//! back: a failure after a reset clear can leave the sheet empty.

use easybroker_client::{fetch, PropertyApi};
use tracing::{info, warn};

use crate::error::SyncError;
use crate::feed::format_feed;
use crate::request::{SyncPlan, SyncRequest};
use crate::response::{SyncOutcome, SyncReport};
use crate::sink::CatalogSink;

pub struct SyncService<A, S> {
    api: A,
    sink: S,
}

impl<A: PropertyApi, S: CatalogSink> SyncService<A, S> {
    pub fn new(api: A, sink: S) -> Self {
        Self { api, sink }
    }

    /// Run one sync invocation end to end.
    pub async fn run(&self, request: &SyncRequest) -> Result<SyncReport, SyncError> {
        let plan = request.validate()?;

        let (spreadsheet_id, summaries, reset) = match &plan {
            SyncPlan::Filtered {
                spreadsheet_id,
                statuses,
                property_types,
                reset,
            } => {
                info!(
                    spreadsheet_id = %spreadsheet_id,
                    statuses = ?statuses,
                    property_types = ?property_types,
                    "starting filtered sync"
                );
                let summaries = fetch::fetch_all(&self.api, statuses, property_types).await?;
                (spreadsheet_id.clone(), summaries, *reset)
            }
            SyncPlan::PageRange {
                spreadsheet_id,
                start_page,
                end_page,
            } => {
                info!(
                    spreadsheet_id = %spreadsheet_id,
                    start_page,
                    end_page,
                    "starting bounded sync"
                );
                let summaries =
                    fetch::fetch_page_range(&self.api, *start_page, *end_page).await?;
                (spreadsheet_id.clone(), summaries, false)
            }
        };

        let public_ids: Vec<String> = summaries.iter().map(|s| s.public_id.clone()).collect();
        info!(count = public_ids.len(), "fetching property details");
        let details = fetch::fetch_details(&self.api, &public_ids).await?;

        let output = format_feed(&summaries, &details);
        if !output.dropped.is_empty() {
            warn!(
                dropped = output.dropped.len(),
                "some listings failed row validation"
            );
        }

        if reset {
            info!(spreadsheet_id = %spreadsheet_id, "clearing catalog sheet before sync");
            self.sink.clear(&spreadsheet_id).await?;
        }

        self.sink.append(&spreadsheet_id, &output.rows).await?;
        let sheet = self.sink.info(&spreadsheet_id).await?;

        info!(
            rows_added = output.rows.len(),
            row_count = sheet.row_count,
            spreadsheet_title = %sheet.title,
            "sync complete"
        );

        let (statuses, property_types, start_page, end_page) = match plan {
            SyncPlan::Filtered {
                statuses,
                property_types,
                ..
            } => (
                Some(statuses.iter().map(|s| s.as_str().to_string()).collect()),
                Some(property_types),
                None,
                None,
            ),
            SyncPlan::PageRange {
                start_page,
                end_page,
                ..
            } => (None, None, Some(start_page), Some(end_page)),
        };

        Ok(SyncReport {
            message: format!(
                "Synced {} properties into \"{}\"",
                output.rows.len(),
                sheet.title
            ),
            rows_added: output.rows.len(),
            rows_dropped: output.dropped.len(),
            statuses,
            property_types,
            start_page,
            end_page,
            spreadsheet_title: sheet.title,
            row_count: sheet.row_count,
        })
    }

    /// [`Self::run`] wrapped into the uniform response envelope; this is what
    /// the transport layer calls, and it never returns an error.
    pub async fn run_to_outcome(&self, request: &SyncRequest) -> SyncOutcome {
        SyncOutcome::from_result(self.run(request).await)
    }
}
