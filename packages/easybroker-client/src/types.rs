//! Wire types for the EasyBroker v1 API.
//!
//! Shapes mirror the `/properties` list endpoint and the per-property detail
//! endpoint. Fields the API documents as nullable (or that have drifted across
//! accounts in practice) are `Option`; list-level collections default to empty
//! so a sparse payload still deserializes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Publication status of a property in EasyBroker.
///
/// The list endpoint accepts these as `search[statuses][]` filters but does
/// not include the status on the summary records it returns; the exhaustive
/// fetcher stamps each summary with the status it was fetched under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Published,
    NotPublished,
    Reserved,
    Sold,
    Rented,
    Suspended,
}

impl PropertyStatus {
    pub const ALL: [PropertyStatus; 6] = [
        PropertyStatus::Published,
        PropertyStatus::NotPublished,
        PropertyStatus::Reserved,
        PropertyStatus::Sold,
        PropertyStatus::Rented,
        PropertyStatus::Suspended,
    ];

    /// The wire form used in query parameters and catalog mapping.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Published => "published",
            PropertyStatus::NotPublished => "not_published",
            PropertyStatus::Reserved => "reserved",
            PropertyStatus::Sold => "sold",
            PropertyStatus::Rented => "rented",
            PropertyStatus::Suspended => "suspended",
        }
    }

    /// Parse a wire-form status, returning `None` for unrecognized values.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == value)
    }
}

impl std::fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of the `/properties` list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyPage {
    pub pagination: Pagination,
    #[serde(default)]
    pub content: Vec<PropertySummary>,
}

/// Pagination envelope returned alongside every listing page.
///
/// `next_page` is a full URL supplied by the server; the exhaustive fetcher
/// dereferences it verbatim rather than incrementing a page counter.
#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    pub limit: u32,
    pub page: u32,
    pub total: u64,
    #[serde(default)]
    pub next_page: Option<String>,
}

/// A property as it appears in listing pages.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertySummary {
    pub public_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_image_full: Option<String>,
    #[serde(default)]
    pub title_image_thumb: Option<String>,
    /// Free-text location label, not the structured detail location.
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub bedrooms: Option<f64>,
    #[serde(default)]
    pub bathrooms: Option<f64>,
    #[serde(default)]
    pub parking_spaces: Option<f64>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub lot_size: Option<f64>,
    #[serde(default)]
    pub construction_size: Option<f64>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub agent: Option<String>,
    #[serde(default)]
    pub show_prices: Option<bool>,
    #[serde(default)]
    pub share_commission: Option<bool>,
    /// Not present in the raw payload; stamped by the exhaustive fetcher with
    /// the status filter each page was fetched under.
    #[serde(default)]
    pub status: Option<PropertyStatus>,
}

/// A sale or rental operation attached to a property.
#[derive(Debug, Clone, Deserialize)]
pub struct Operation {
    /// `"sale"` or `"rental"` on listing summaries.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub formatted_amount: Option<String>,
    /// Union shape on the wire (percentage vs fixed amount); kept loose.
    #[serde(default)]
    pub commission: Option<serde_json::Value>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// The full per-property record from `/properties/{public_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDetails {
    pub public_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<f64>,
    #[serde(default)]
    pub bathrooms: Option<f64>,
    #[serde(default)]
    pub half_bathrooms: Option<f64>,
    #[serde(default)]
    pub parking_spaces: Option<f64>,
    #[serde(default)]
    pub lot_size: Option<f64>,
    #[serde(default)]
    pub construction_size: Option<f64>,
    #[serde(default)]
    pub lot_length: Option<f64>,
    #[serde(default)]
    pub lot_width: Option<f64>,
    #[serde(default)]
    pub floors: Option<f64>,
    #[serde(default)]
    pub floor: Option<f64>,
    /// Free text; some accounts return a bare number here.
    #[serde(default, deserialize_with = "string_or_number")]
    pub age: Option<String>,
    #[serde(default)]
    pub internal_id: Option<String>,
    #[serde(default)]
    pub expenses: Option<String>,
    #[serde(default)]
    pub location: Option<DetailLocation>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub virtual_tour: Option<String>,
    #[serde(default)]
    pub public_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub property_images: Vec<PropertyImage>,
    #[serde(default)]
    pub features: Vec<PropertyFeature>,
    #[serde(default)]
    pub agent: Option<AgentSummary>,
}

/// Structured location on the detail record.
///
/// `name` encodes "Neighborhood, City" joined by a comma; the feed formatter
/// splits it downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailLocation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub exterior_number: Option<String>,
    #[serde(default)]
    pub interior_number: Option<String>,
    #[serde(default)]
    pub show_exact_location: Option<bool>,
    #[serde(default)]
    pub hide_exact_location: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyImage {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyFeature {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentSummary {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub mobile_phone: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Query for one page of the listing endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub statuses: Vec<PropertyStatus>,
    pub property_types: Vec<String>,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            statuses: Vec::new(),
            property_types: Vec::new(),
        }
    }

    pub fn with_statuses(mut self, statuses: Vec<PropertyStatus>) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn with_property_types(mut self, property_types: Vec<String>) -> Self {
        self.property_types = property_types;
        self
    }

    /// Render as query parameters for the `/properties` endpoint.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        for status in &self.statuses {
            params.push(("search[statuses][]".to_string(), status.as_str().to_string()));
        }
        for property_type in &self.property_types {
            params.push(("search[property_types][]".to_string(), property_type.clone()));
        }
        params
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_round_trip() {
        for status in PropertyStatus::ALL {
            assert_eq!(PropertyStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PropertyStatus::parse("archived"), None);
    }

    #[test]
    fn test_summary_deserializes_without_status() {
        let json = r#"{
            "public_id": "EB-B1234",
            "title": "Casa en Polanco",
            "location": "Polanco, Miguel Hidalgo",
            "operations": [
                {"type": "sale", "amount": 1500000, "currency": "MXN",
                 "formatted_amount": "$1,500,000", "unit": "total"}
            ],
            "bedrooms": 3,
            "bathrooms": 2.5,
            "property_type": "Casa",
            "updated_at": "2024-11-03T16:20:53-06:00",
            "agent": "Ana",
            "show_prices": true,
            "share_commission": false
        }"#;

        let summary: PropertySummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.public_id, "EB-B1234");
        assert_eq!(summary.status, None);
        assert_eq!(summary.operations[0].kind, "sale");
        assert_eq!(summary.bathrooms, Some(2.5));
    }

    #[test]
    fn test_details_age_accepts_number() {
        let json = r#"{"public_id": "EB-1", "age": 1998}"#;
        let details: PropertyDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.age.as_deref(), Some("1998"));

        let json = r#"{"public_id": "EB-2", "age": "Built in 1998"}"#;
        let details: PropertyDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.age.as_deref(), Some("Built in 1998"));

        let json = r#"{"public_id": "EB-3", "age": null}"#;
        let details: PropertyDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.age, None);
    }

    #[test]
    fn test_list_query_params() {
        let query = ListQuery::new(2, 50)
            .with_statuses(vec![PropertyStatus::Published])
            .with_property_types(vec!["Casa".to_string(), "Terreno".to_string()]);

        let params = query.to_params();
        assert_eq!(params[0], ("page".to_string(), "2".to_string()));
        assert_eq!(params[1], ("limit".to_string(), "50".to_string()));
        assert!(params.contains(&(
            "search[statuses][]".to_string(),
            "published".to_string()
        )));
        assert_eq!(
            params
                .iter()
                .filter(|(k, _)| k == "search[property_types][]")
                .count(),
            2
        );
    }
}
