//! Mock property API for exercising the fetch strategies without a network.
//!
//! Canned pages are keyed by `(status filter, page number)` for query-driven
//! requests and by URL for next-page links. Anything without a canned response
//! fails with an HTTP 404 API error, which doubles as the injected-failure
//! mechanism in tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use crate::error::{EasyBrokerError, Result};
use crate::types::{
    ListQuery, Pagination, PropertyDetails, PropertyPage, PropertyStatus, PropertySummary,
};
use crate::PropertyApi;

#[derive(Default)]
pub struct MockPropertyApi {
    /// Canned list pages keyed by (first status filter, page number).
    list_pages: Arc<RwLock<HashMap<(Option<PropertyStatus>, u32), PropertyPage>>>,
    /// Canned pages keyed by next-page URL.
    linked_pages: Arc<RwLock<HashMap<String, PropertyPage>>>,
    /// Canned detail records keyed by public id.
    details: Arc<RwLock<HashMap<String, PropertyDetails>>>,
    /// Recorded calls for verification.
    list_calls: Arc<RwLock<Vec<ListQuery>>>,
    follow_calls: Arc<RwLock<Vec<String>>>,
    detail_calls: Arc<RwLock<Vec<String>>>,
}

impl MockPropertyApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned page for a `list_page` query.
    pub fn add_list_page(&self, status: Option<PropertyStatus>, page: u32, result: PropertyPage) {
        self.list_pages
            .write()
            .unwrap()
            .insert((status, page), result);
    }

    /// Add a canned page reachable through a next-page link.
    pub fn add_linked_page(&self, url: &str, result: PropertyPage) {
        self.linked_pages
            .write()
            .unwrap()
            .insert(url.to_string(), result);
    }

    /// Add a canned detail record.
    pub fn add_details(&self, record: PropertyDetails) {
        self.details
            .write()
            .unwrap()
            .insert(record.public_id.clone(), record);
    }

    /// Queries received by `list_page`.
    pub fn list_calls(&self) -> Vec<ListQuery> {
        self.list_calls.read().unwrap().clone()
    }

    /// URLs received by `follow_page`.
    pub fn follow_calls(&self) -> Vec<String> {
        self.follow_calls.read().unwrap().clone()
    }

    /// Public ids received by `property_details`.
    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.read().unwrap().clone()
    }
}

impl Clone for MockPropertyApi {
    fn clone(&self) -> Self {
        Self {
            list_pages: Arc::clone(&self.list_pages),
            linked_pages: Arc::clone(&self.linked_pages),
            details: Arc::clone(&self.details),
            list_calls: Arc::clone(&self.list_calls),
            follow_calls: Arc::clone(&self.follow_calls),
            detail_calls: Arc::clone(&self.detail_calls),
        }
    }
}

fn not_found(what: &str) -> EasyBrokerError {
    EasyBrokerError::Api {
        status: 404,
        message: format!("no canned response for {what}"),
    }
}

#[async_trait]
impl PropertyApi for MockPropertyApi {
    async fn list_page(&self, query: &ListQuery) -> Result<PropertyPage> {
        self.list_calls.write().unwrap().push(query.clone());

        let key = (query.statuses.first().copied(), query.page);
        self.list_pages
            .read()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| not_found(&format!("page {:?}", key)))
    }

    async fn follow_page(&self, next_page_url: &str) -> Result<PropertyPage> {
        self.follow_calls
            .write()
            .unwrap()
            .push(next_page_url.to_string());

        self.linked_pages
            .read()
            .unwrap()
            .get(next_page_url)
            .cloned()
            .ok_or_else(|| not_found(next_page_url))
    }

    async fn property_details(&self, public_id: &str) -> Result<PropertyDetails> {
        self.detail_calls
            .write()
            .unwrap()
            .push(public_id.to_string());

        self.details
            .read()
            .unwrap()
            .get(public_id)
            .cloned()
            .ok_or_else(|| not_found(public_id))
    }
}

/// A minimal listing summary for tests.
pub fn summary(public_id: &str) -> PropertySummary {
    PropertySummary {
        public_id: public_id.to_string(),
        title: Some(format!("Property {public_id}")),
        title_image_full: None,
        title_image_thumb: None,
        location: None,
        operations: Vec::new(),
        bedrooms: None,
        bathrooms: None,
        parking_spaces: None,
        property_type: None,
        lot_size: None,
        construction_size: None,
        updated_at: Some(Utc::now()),
        agent: None,
        show_prices: None,
        share_commission: None,
        status: None,
    }
}

/// A minimal detail record for tests.
pub fn details(public_id: &str) -> PropertyDetails {
    PropertyDetails {
        public_id: public_id.to_string(),
        title: Some(format!("Property {public_id}")),
        description: None,
        bedrooms: None,
        bathrooms: None,
        half_bathrooms: None,
        parking_spaces: None,
        lot_size: None,
        construction_size: None,
        lot_length: None,
        lot_width: None,
        floors: None,
        floor: None,
        age: None,
        internal_id: None,
        expenses: None,
        location: None,
        property_type: None,
        created_at: None,
        updated_at: None,
        published_at: None,
        operations: Vec::new(),
        virtual_tour: None,
        public_url: None,
        tags: Vec::new(),
        property_images: Vec::new(),
        features: Vec::new(),
        agent: None,
    }
}

/// Wrap summaries into a listing page with an optional next-page link.
pub fn page(content: Vec<PropertySummary>, next_page: Option<&str>) -> PropertyPage {
    PropertyPage {
        pagination: Pagination {
            limit: 50,
            page: 1,
            total: content.len() as u64,
            next_page: next_page.map(|s| s.to_string()),
        },
        content,
    }
}
