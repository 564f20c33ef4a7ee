//! Page-aggregation strategies over a [`PropertyApi`].
//!
//! Two retrieval modes:
//!
//! - [`fetch_page_range`] is bounded: an explicit `start..=end` page window,
//!   validated up front and capped at [`MAX_PAGE_SPAN`] pages.
//! - [`fetch_all`] is exhaustive: one chain per status filter, following the
//!   server-supplied `next_page` links until exhausted, under a wall-clock
//!   deadline sized for a serverless execution ceiling.
//!
//! Neither mode retries. A failed page aborts the whole operation and the
//! partial accumulator is discarded; transient errors are the caller's
//! problem.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use futures::future;
use tracing::{debug, info, warn};

use crate::error::{EasyBrokerError, Result};
use crate::types::{ListQuery, PropertyDetails, PropertyStatus, PropertySummary};
use crate::PropertyApi;

/// Fixed page size for all listing requests.
pub const PAGE_SIZE: u32 = 50;

/// Maximum number of pages a bounded fetch may cover.
pub const MAX_PAGE_SPAN: u32 = 10;

/// Wall-clock budget for an exhaustive fetch: 14.5 minutes, just under the
/// 15-minute execution ceiling of the surrounding host.
pub const QUERY_DEADLINE: Duration = Duration::from_secs(870);

/// Fetch an explicit page window, in page order then in-page order.
///
/// Stops early when a page reports no `next_page`. Range violations fail with
/// [`EasyBrokerError::InvalidPageRange`] before any request is issued.
pub async fn fetch_page_range<A: PropertyApi>(
    api: &A,
    start_page: u32,
    end_page: u32,
) -> Result<Vec<PropertySummary>> {
    if start_page < 1 || end_page < start_page || end_page - start_page + 1 > MAX_PAGE_SPAN {
        return Err(EasyBrokerError::InvalidPageRange {
            start: start_page,
            end: end_page,
        });
    }

    let mut listings = Vec::new();
    for page in start_page..=end_page {
        debug!(page, "fetching listing page");
        let result = api
            .list_page(&ListQuery::new(page, PAGE_SIZE))
            .await
            .map_err(|e| {
                warn!(page, error = %e, "listing page fetch failed");
                e
            })?;

        let has_next = result.pagination.next_page.is_some();
        listings.extend(result.content);

        if !has_next {
            debug!(page, "no further pages, stopping early");
            break;
        }
    }

    info!(
        start_page,
        end_page,
        count = listings.len(),
        "bounded fetch complete"
    );
    Ok(listings)
}

/// Fetch every page matching the given filters, one link-chain per status.
///
/// Each returned summary is stamped with the status it was fetched under,
/// since the list payload does not carry one. Results are concatenated across
/// statuses in input order and are not deduplicated: a property matching two
/// status filters appears twice.
pub async fn fetch_all<A: PropertyApi>(
    api: &A,
    statuses: &[PropertyStatus],
    property_types: &[String],
) -> Result<Vec<PropertySummary>> {
    fetch_all_with_deadline(api, statuses, property_types, Instant::now() + QUERY_DEADLINE).await
}

/// [`fetch_all`] with an explicit deadline, checked before every page fetch.
///
/// Exceeding the deadline fails with [`EasyBrokerError::QueryTimeout`] rather
/// than returning a partial result, so the caller can narrow its filters. The
/// check is cooperative: an in-flight request is never cancelled.
pub async fn fetch_all_with_deadline<A: PropertyApi>(
    api: &A,
    statuses: &[PropertyStatus],
    property_types: &[String],
    deadline: Instant,
) -> Result<Vec<PropertySummary>> {
    let mut listings = Vec::new();
    let mut pages_fetched: u32 = 0;

    for &status in statuses {
        let mut next_page: Option<String> = None;

        loop {
            if Instant::now() >= deadline {
                warn!(pages_fetched, status = %status, "query deadline exceeded");
                return Err(EasyBrokerError::QueryTimeout { pages_fetched });
            }

            let page = match &next_page {
                None => {
                    let query = ListQuery::new(1, PAGE_SIZE)
                        .with_statuses(vec![status])
                        .with_property_types(property_types.to_vec());
                    api.list_page(&query).await
                }
                Some(url) => api.follow_page(url).await,
            }
            .map_err(|e| {
                warn!(status = %status, page = pages_fetched + 1, error = %e, "listing page fetch failed");
                e
            })?;

            pages_fetched += 1;
            next_page = page.pagination.next_page.clone();

            // Enrichment step: the wire summaries carry no status of their own.
            listings.extend(page.content.into_iter().map(|mut summary| {
                summary.status = Some(status);
                summary
            }));

            if next_page.is_none() {
                debug!(status = %status, pages_fetched, "status chain exhausted");
                break;
            }
        }
    }

    info!(
        statuses = statuses.len(),
        pages_fetched,
        count = listings.len(),
        "exhaustive fetch complete"
    );
    Ok(listings)
}

/// Fetch detail records for all given ids concurrently, keyed by public id.
///
/// The fan-out is unbounded and all-or-nothing: the first failure observed is
/// surfaced, while already-dispatched requests run to completion on their own.
pub async fn fetch_details<A: PropertyApi>(
    api: &A,
    public_ids: &[String],
) -> Result<HashMap<String, PropertyDetails>> {
    let fetches = public_ids.iter().map(|public_id| async move {
        let details = api.property_details(public_id).await.map_err(|e| {
            warn!(public_id = %public_id, error = %e, "detail fetch failed");
            e
        })?;
        Ok::<_, EasyBrokerError>((public_id.clone(), details))
    });

    let pairs = future::try_join_all(fetches).await?;
    debug!(count = pairs.len(), "detail fan-out complete");
    Ok(pairs.into_iter().collect())
}
