//! Listing-to-catalog-row formatting.
//!
//! A pure function from listing summaries plus their keyed detail records to
//! validated [`CatalogRow`]s. Rows that fail the required-field check are not
//! emitted; each one is reported as a [`DroppedRow`] naming the first missing
//! column so callers can see why the output count differs from the input.

use std::collections::HashMap;

use chrono::{Datelike, Utc};
use easybroker_client::{Operation, PropertyDetails, PropertyStatus, PropertySummary};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::row::{Availability, CatalogRow, ImageSlot};

/// Field cap of the destination catalog's description column.
const DESCRIPTION_MAX_CHARS: usize = 5000;

/// All feed prices are quoted in Mexican pesos.
const PRICE_CURRENCY: &str = "MXN";

const COUNTRY: &str = "Mexico";
const AREA_UNIT: &str = "sq_m";

/// Result of a formatting pass.
#[derive(Debug, Clone)]
pub struct FeedOutput {
    pub rows: Vec<CatalogRow>,
    pub dropped: Vec<DroppedRow>,
}

/// Diagnostic for a row excluded by validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    pub public_id: String,
    /// Spreadsheet column name of the first required field found empty.
    pub missing_field: &'static str,
}

/// Build one catalog row per summary, in summary order, keeping only rows
/// that pass the required-field check.
///
/// `details` is keyed by public id; a summary without a detail record formats
/// as if every detail field were empty (and will drop on the url check).
/// Output is deterministic apart from the current-year fallback in
/// [`map_year_built`].
pub fn format_feed(
    summaries: &[PropertySummary],
    details: &HashMap<String, PropertyDetails>,
) -> FeedOutput {
    let mut rows = Vec::with_capacity(summaries.len());
    let mut dropped = Vec::new();

    for summary in summaries {
        let row = build_row(summary, details.get(&summary.public_id));
        match validate_row(&row) {
            Ok(()) => rows.push(row),
            Err(missing_field) => {
                debug!(public_id = %summary.public_id, missing_field, "dropping invalid row");
                dropped.push(DroppedRow {
                    public_id: summary.public_id.clone(),
                    missing_field,
                });
            }
        }
    }

    FeedOutput { rows, dropped }
}

fn build_row(summary: &PropertySummary, detail: Option<&PropertyDetails>) -> CatalogRow {
    let first_operation = summary.operations.first();

    let location = detail.and_then(|d| d.location.as_ref());
    let location_name = location.and_then(|l| l.name.as_deref()).unwrap_or("");
    // "Neighborhood, City" joined by comma; the source does not distinguish
    // city from region, so both get the second segment.
    let mut segments = location_name.split(',');
    let neighborhood = segments.next().map(str::trim).unwrap_or("").to_string();
    let city = segments.next().map(str::trim).unwrap_or("").to_string();

    let mut images: [ImageSlot; super::row::IMAGE_SLOTS] = Default::default();
    if let Some(detail) = detail {
        for (slot, image) in images.iter_mut().zip(&detail.property_images) {
            slot.url = image.url.clone();
            slot.tag = image.title.clone().unwrap_or_default();
        }
    }

    CatalogRow {
        home_listing_id: summary.public_id.clone(),
        name: summary.title.clone().unwrap_or_default(),
        description: sanitize_description(
            detail.and_then(|d| d.description.as_deref()).unwrap_or(""),
        ),
        availability: map_availability(
            summary.status,
            first_operation.map(|op| op.kind.as_str()),
        ),
        price: format_price(first_operation),
        property_type: map_property_type(summary.property_type.as_deref()).to_string(),
        garden_type: String::new(),
        url: detail
            .and_then(|d| d.public_url.clone())
            .unwrap_or_default(),
        num_baths: floor_opt(summary.bathrooms),
        num_beds: floor_opt(summary.bedrooms),
        num_rooms: floor_opt(detail.and_then(|d| d.floors)),
        pet_policy: String::new(),
        area_size: floor_opt(summary.construction_size),
        land_area_size: floor_opt(summary.lot_size),
        parking_spaces: floor_opt(summary.parking_spaces),
        area_unit: AREA_UNIT.to_string(),
        year_built: map_year_built(detail.and_then(|d| d.age.as_deref())),
        addr1: location
            .and_then(|l| l.street.clone())
            .unwrap_or_default(),
        region: city.clone(),
        city,
        country: COUNTRY.to_string(),
        neighborhood,
        virtual_tour_url: detail
            .and_then(|d| d.virtual_tour.clone())
            .unwrap_or_default(),
        images,
    }
}

/// Strip control characters, normalize line endings to `\n`, trim, and cap at
/// the destination's 5000-character limit. Printable ASCII and anything at or
/// above U+00A0 survives.
fn sanitize_description(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|&c| c == '\n' || c == '\r' || ('\u{20}'..='\u{7E}').contains(&c) || c >= '\u{A0}')
        .collect();
    let normalized = kept.replace("\r\n", "\n").replace('\r', "\n");
    normalized.trim().chars().take(DESCRIPTION_MAX_CHARS).collect()
}

/// Map an EasyBroker status to a catalog availability value.
///
/// `published` is ambiguous between sale and rental listings; the first
/// operation's kind breaks the tie. A missing status means the listing did not
/// come through the status-filtered path and defaults to off-market.
fn map_availability(
    status: Option<PropertyStatus>,
    first_operation_kind: Option<&str>,
) -> Availability {
    match status {
        None => Availability::OffMarket,
        Some(PropertyStatus::Published) => {
            if first_operation_kind == Some("rental") {
                Availability::ForRent
            } else {
                Availability::ForSale
            }
        }
        Some(PropertyStatus::Reserved) => Availability::SalePending,
        Some(PropertyStatus::Sold) => Availability::RecentlySold,
        Some(PropertyStatus::Rented)
        | Some(PropertyStatus::Suspended)
        | Some(PropertyStatus::NotPublished) => Availability::OffMarket,
    }
}

/// Translate the most common EasyBroker property type labels. The table is
/// intentionally partial; everything unmapped is "other".
fn map_property_type(label: Option<&str>) -> &'static str {
    match label {
        Some("Casa") => "house",
        Some("Departamento") => "apartment",
        Some("Terreno") => "land",
        _ => "other",
    }
}

/// First operation's display amount stripped to digits, with the fixed
/// currency suffix. No operation (or an empty display amount) yields the
/// zero placeholder.
fn format_price(operation: Option<&Operation>) -> String {
    let formatted = operation
        .and_then(|op| op.formatted_amount.as_deref())
        .unwrap_or("");
    if formatted.is_empty() {
        return format!("0 {PRICE_CURRENCY}");
    }
    let digits: String = formatted.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("{digits} {PRICE_CURRENCY}")
}

/// Interpret the free-text age field as a year.
///
/// Construction tokens mean the building is current-year stock; otherwise the
/// first 4-digit run in the text is used verbatim.
fn map_year_built(age: Option<&str>) -> String {
    lazy_static! {
        static ref YEAR: Regex = Regex::new(r"\d{4}").unwrap();
    }

    let age = match age {
        Some(a) if !a.trim().is_empty() => a.trim(),
        _ => return String::new(),
    };

    if age == "new_construction" || age == "under_construction" {
        return Utc::now().year().to_string();
    }

    YEAR.find(age)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn floor_opt(value: Option<f64>) -> Option<i64> {
    value.map(|v| v.floor() as i64)
}

/// Required columns, checked in order; the first empty one names the drop.
fn validate_row(row: &CatalogRow) -> Result<(), &'static str> {
    let required: [(&'static str, &str); 9] = [
        ("home_listing_id", &row.home_listing_id),
        ("name", &row.name),
        ("price", &row.price),
        ("url", &row.url),
        ("address.city", &row.city),
        ("address.country", &row.country),
        ("neighborhood[0]", &row.neighborhood),
        ("image[0].url", &row.images[0].url),
        ("image[0].tag[0]", &row.images[0].tag),
    ];

    for (name, value) in required {
        if value.is_empty() {
            return Err(name);
        }
    }
    // Availability is an enum and always renders non-empty, but it is part of
    // the destination's required set, so keep it in the check.
    if row.availability.as_str().is_empty() {
        return Err("availability");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use easybroker_client::testing::{details, summary};
    use easybroker_client::{DetailLocation, PropertyImage};

    fn operation(kind: &str, formatted_amount: Option<&str>) -> Operation {
        Operation {
            kind: kind.to_string(),
            amount: None,
            currency: Some("MXN".to_string()),
            formatted_amount: formatted_amount.map(|s| s.to_string()),
            commission: None,
            unit: Some("total".to_string()),
        }
    }

    fn location(name: &str) -> DetailLocation {
        DetailLocation {
            name: Some(name.to_string()),
            latitude: None,
            longitude: None,
            street: Some("Av. Reforma 100".to_string()),
            postal_code: None,
            exterior_number: None,
            interior_number: None,
            show_exact_location: None,
            hide_exact_location: None,
        }
    }

    /// A summary/detail pair that passes every required-field check.
    fn valid_pair(public_id: &str) -> (PropertySummary, PropertyDetails) {
        let mut s = summary(public_id);
        s.status = Some(PropertyStatus::Published);
        s.operations = vec![operation("sale", Some("$1,500,000"))];
        s.property_type = Some("Casa".to_string());

        let mut d = details(public_id);
        d.public_url = Some(format!("https://example.com/{public_id}"));
        d.location = Some(location("Roma Norte, Ciudad de Mexico"));
        d.property_images = vec![PropertyImage {
            url: format!("https://img.example.com/{public_id}/0.jpg"),
            title: Some("Facade".to_string()),
        }];
        (s, d)
    }

    fn keyed(details: Vec<PropertyDetails>) -> HashMap<String, PropertyDetails> {
        details
            .into_iter()
            .map(|d| (d.public_id.clone(), d))
            .collect()
    }

    #[test]
    fn test_description_is_sanitized_and_capped() {
        let (s, mut d) = valid_pair("EB-1");
        d.description = Some(format!(
            "Line one\r\nLine two\rLine three\u{0007}\u{0000} end{}",
            "x".repeat(6000)
        ));

        let output = format_feed(&[s], &keyed(vec![d]));
        let description = &output.rows[0].description;

        assert!(!description.contains('\r'));
        assert!(description.contains("Line one\nLine two\nLine three"));
        assert!(!description.contains('\u{0007}'));
        assert!(!description.contains('\u{0000}'));
        assert_eq!(description.chars().count(), DESCRIPTION_MAX_CHARS);
    }

    #[test]
    fn test_description_keeps_accents_and_trims() {
        let (s, mut d) = valid_pair("EB-1");
        d.description = Some("  Jardín y ático — amplio.  ".to_string());

        let output = format_feed(&[s], &keyed(vec![d]));
        assert_eq!(output.rows[0].description, "Jardín y ático — amplio.");
    }

    #[test]
    fn test_availability_mapping() {
        let cases = [
            (Some(PropertyStatus::Published), "sale", Availability::ForSale),
            (Some(PropertyStatus::Published), "rental", Availability::ForRent),
            (Some(PropertyStatus::Reserved), "sale", Availability::SalePending),
            (Some(PropertyStatus::Sold), "sale", Availability::RecentlySold),
            (Some(PropertyStatus::Rented), "rental", Availability::OffMarket),
            (Some(PropertyStatus::Suspended), "sale", Availability::OffMarket),
            (Some(PropertyStatus::NotPublished), "sale", Availability::OffMarket),
            (None, "sale", Availability::OffMarket),
        ];

        for (status, kind, expected) in cases {
            let (mut s, d) = valid_pair("EB-1");
            s.status = status;
            s.operations = vec![operation(kind, Some("$100"))];

            let output = format_feed(&[s], &keyed(vec![d]));
            assert_eq!(output.rows[0].availability, expected, "{status:?}/{kind}");
        }
    }

    #[test]
    fn test_property_type_table_is_partial() {
        for (label, expected) in [
            (Some("Casa"), "house"),
            (Some("Departamento"), "apartment"),
            (Some("Terreno"), "land"),
            (Some("Bodega industrial"), "other"),
            (None, "other"),
        ] {
            assert_eq!(map_property_type(label), expected);
        }
    }

    #[test]
    fn test_price_strips_display_formatting() {
        let (mut s, d) = valid_pair("EB-1");
        s.operations = vec![operation("sale", Some("$1,500,000 MXN"))];
        let output = format_feed(&[s], &keyed(vec![d]));
        assert_eq!(output.rows[0].price, "1500000 MXN");

        let (mut s, d) = valid_pair("EB-2");
        s.operations = Vec::new();
        let output = format_feed(&[s], &keyed(vec![d]));
        assert_eq!(output.rows[0].price, "0 MXN");
    }

    #[test]
    fn test_numeric_fields_keep_zero_and_absent_apart() {
        let (mut s, mut d) = valid_pair("EB-1");
        s.bathrooms = Some(2.5);
        s.bedrooms = Some(0.0);
        s.parking_spaces = None;
        d.floors = Some(3.9);

        let output = format_feed(&[s], &keyed(vec![d]));
        let row = &output.rows[0];
        assert_eq!(row.num_baths, Some(2));
        assert_eq!(row.num_beds, Some(0));
        assert_eq!(row.parking_spaces, None);
        assert_eq!(row.num_rooms, Some(3));
    }

    #[test]
    fn test_year_built_cases() {
        assert_eq!(map_year_built(Some("new_construction")), Utc::now().year().to_string());
        assert_eq!(map_year_built(Some("under_construction")), Utc::now().year().to_string());
        assert_eq!(map_year_built(Some("Built in 1998")), "1998");
        assert_eq!(map_year_built(Some("10 years")), "");
        assert_eq!(map_year_built(None), "");
    }

    #[test]
    fn test_address_split_populates_city_and_region_identically() {
        let (s, mut d) = valid_pair("EB-1");
        d.location = Some(location("Polanco , Miguel Hidalgo "));

        let output = format_feed(&[s], &keyed(vec![d]));
        let row = &output.rows[0];
        assert_eq!(row.neighborhood, "Polanco");
        assert_eq!(row.city, "Miguel Hidalgo");
        assert_eq!(row.region, "Miguel Hidalgo");
        assert_eq!(row.addr1, "Av. Reforma 100");
        assert_eq!(row.country, "Mexico");
    }

    #[test]
    fn test_image_slots_cap_at_eight() {
        let (s, mut d) = valid_pair("EB-1");
        d.property_images = (0..12)
            .map(|i| PropertyImage {
                url: format!("https://img/{i}.jpg"),
                title: Some(format!("img {i}")),
            })
            .collect();

        let output = format_feed(&[s], &keyed(vec![d]));
        let row = &output.rows[0];
        assert_eq!(row.images[7].url, "https://img/7.jpg");
        assert!(row.images.iter().all(|slot| !slot.url.contains("/8.jpg")));
    }

    #[test]
    fn test_invalid_rows_are_dropped_with_diagnostics() {
        let (s1, d1) = valid_pair("EB-1");
        let (s2, mut d2) = valid_pair("EB-2");
        d2.location = Some(location("Roma Norte")); // no comma, so no city
        let (s3, d3) = valid_pair("EB-3");

        let output = format_feed(&[s1, s2, s3], &keyed(vec![d1, d2, d3]));

        assert_eq!(output.rows.len(), 2);
        assert_eq!(
            output.dropped,
            vec![DroppedRow {
                public_id: "EB-2".to_string(),
                missing_field: "address.city",
            }]
        );
    }

    #[test]
    fn test_missing_detail_record_drops_row() {
        let (s, _) = valid_pair("EB-1");
        let output = format_feed(&[s], &HashMap::new());

        assert!(output.rows.is_empty());
        assert_eq!(output.dropped[0].missing_field, "url");
    }

    #[test]
    fn test_three_listings_one_empty_location_name() {
        let (s1, mut d1) = valid_pair("EB-1");
        d1.location = Some(location("Condesa, Cuauhtemoc"));
        let (s2, mut d2) = valid_pair("EB-2");
        d2.location = Some(DetailLocation {
            name: Some(String::new()),
            ..location("")
        });
        let (s3, mut d3) = valid_pair("EB-3");
        d3.location = Some(location("Del Valle, Benito Juarez"));

        let output = format_feed(&[s1, s2, s3], &keyed(vec![d1, d2, d3]));

        assert_eq!(output.rows.len(), 2);
        assert_eq!(output.rows[0].neighborhood, "Condesa");
        assert_eq!(output.rows[0].city, "Cuauhtemoc");
        assert_eq!(output.rows[1].neighborhood, "Del Valle");
        assert_eq!(output.rows[1].city, "Benito Juarez");
        assert_eq!(output.dropped.len(), 1);
        assert_eq!(output.dropped[0].public_id, "EB-2");
    }

    #[test]
    fn test_output_is_deterministic() {
        let (s1, d1) = valid_pair("EB-1");
        let (s2, d2) = valid_pair("EB-2");
        let summaries = vec![s1, s2];
        let detail_map = keyed(vec![d1, d2]);

        let first = format_feed(&summaries, &detail_map);
        let second = format_feed(&summaries, &detail_map);
        assert_eq!(first.rows, second.rows);
    }
}
