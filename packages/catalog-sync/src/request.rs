//! Inbound sync request contract.
//!
//! The payload accepted from the Lambda function URL or the MCP tool call.
//! Validation turns the loose wire shape into a [`SyncPlan`] before any
//! network traffic happens.

use easybroker_client::PropertyStatus;
use serde::Deserialize;

use crate::error::SyncError;

/// Property type labels EasyBroker accepts as `search[property_types][]`
/// filters. These are the labels the account UI uses, hence Spanish.
pub const KNOWN_PROPERTY_TYPES: [&str; 19] = [
    "Bodega comercial",
    "Bodega industrial",
    "Casa",
    "Casa con uso de suelo",
    "Casa en condominio",
    "Departamento",
    "Edificio",
    "Huerta",
    "Local comercial",
    "Local en centro comercial",
    "Nave industrial",
    "Oficina",
    "Otro",
    "Quinta",
    "Rancho",
    "Terreno",
    "Terreno comercial",
    "Terreno industrial",
    "Villa",
];

/// Raw sync request as received on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
    /// Defaults to true: a sync replaces the sheet unless told otherwise.
    #[serde(default)]
    pub reset_spreadsheet: Option<bool>,
    #[serde(default)]
    pub statuses: Option<Vec<String>>,
    /// Empty means "all property types".
    #[serde(default)]
    pub property_types: Option<Vec<String>>,
    #[serde(default)]
    pub start_page: Option<u32>,
    #[serde(default)]
    pub end_page: Option<u32>,
}

/// A validated request, ready for the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncPlan {
    /// Exhaustive status-filtered retrieval.
    Filtered {
        spreadsheet_id: String,
        statuses: Vec<PropertyStatus>,
        property_types: Vec<String>,
        reset: bool,
    },
    /// Bounded page-range retrieval; always a blind append.
    PageRange {
        spreadsheet_id: String,
        start_page: u32,
        end_page: u32,
    },
}

impl SyncRequest {
    /// Validate the request and choose the retrieval mode.
    ///
    /// Page bounds select the bounded mode when both are present; one without
    /// the other is an error. Span arithmetic itself is enforced by the
    /// fetcher, which owns the page-range rule.
    pub fn validate(&self) -> Result<SyncPlan, SyncError> {
        let spreadsheet_id = self
            .spreadsheet_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(SyncError::MissingParameter {
                name: "spreadsheetId",
            })?
            .to_string();

        match (self.start_page, self.end_page) {
            (Some(start_page), Some(end_page)) => Ok(SyncPlan::PageRange {
                spreadsheet_id,
                start_page,
                end_page,
            }),
            (Some(_), None) => Err(SyncError::MissingParameter { name: "endPage" }),
            (None, Some(_)) => Err(SyncError::MissingParameter { name: "startPage" }),
            (None, None) => {
                let statuses = self.validated_statuses()?;
                let property_types = self.validated_property_types()?;
                Ok(SyncPlan::Filtered {
                    spreadsheet_id,
                    statuses,
                    property_types,
                    reset: self.reset_spreadsheet.unwrap_or(true),
                })
            }
        }
    }

    /// Absent or empty means the default `[published]` filter.
    fn validated_statuses(&self) -> Result<Vec<PropertyStatus>, SyncError> {
        let raw = match &self.statuses {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(vec![PropertyStatus::Published]),
        };
        raw.iter()
            .map(|value| {
                PropertyStatus::parse(value).ok_or_else(|| SyncError::InvalidEnumValue {
                    field: "statuses",
                    value: value.clone(),
                })
            })
            .collect()
    }

    fn validated_property_types(&self) -> Result<Vec<String>, SyncError> {
        let raw = self.property_types.clone().unwrap_or_default();
        for value in &raw {
            if !KNOWN_PROPERTY_TYPES.contains(&value.as_str()) {
                return Err(SyncError::InvalidEnumValue {
                    field: "propertyTypes",
                    value: value.clone(),
                });
            }
        }
        Ok(raw)
    }
}
