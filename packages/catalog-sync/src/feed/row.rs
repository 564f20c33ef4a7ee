//! The Meta catalog feed row schema.
//!
//! One flat record per property, written to the destination spreadsheet in a
//! fixed column order. The 8 image slots are generated from a field table
//! rather than hand-written per slot.

use lazy_static::lazy_static;

/// Number of image slots in the feed schema. Extra source images are dropped.
pub const IMAGE_SLOTS: usize = 8;

/// Catalog availability values accepted by the destination feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    ForSale,
    ForRent,
    SalePending,
    RecentlySold,
    OffMarket,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::ForSale => "for_sale",
            Availability::ForRent => "for_rent",
            Availability::SalePending => "sale_pending",
            Availability::RecentlySold => "recently_sold",
            Availability::OffMarket => "off_market",
        }
    }
}

/// One image column pair. Empty strings mean an unused slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSlot {
    pub url: String,
    pub tag: String,
}

/// One output row of the catalog feed.
///
/// String fields use the empty string as the absent marker; numeric fields
/// keep `None` so that zero and "unknown" stay distinguishable downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
    pub home_listing_id: String,
    pub name: String,
    pub description: String,
    pub availability: Availability,
    pub price: String,
    pub property_type: String,
    pub garden_type: String,
    pub url: String,
    pub num_baths: Option<i64>,
    pub num_beds: Option<i64>,
    pub num_rooms: Option<i64>,
    pub pet_policy: String,
    pub area_size: Option<i64>,
    pub land_area_size: Option<i64>,
    pub parking_spaces: Option<i64>,
    pub area_unit: String,
    pub year_built: String,
    pub addr1: String,
    pub city: String,
    pub region: String,
    pub country: String,
    pub neighborhood: String,
    pub virtual_tour_url: String,
    pub images: [ImageSlot; IMAGE_SLOTS],
}

/// Scalar column names in output order, before the image slot columns.
const SCALAR_HEADERS: [&str; 23] = [
    "home_listing_id",
    "name",
    "description",
    "availability",
    "price",
    "property_type",
    "garden_type",
    "url",
    "num_baths",
    "num_beds",
    "num_rooms",
    "pet_policy",
    "area_size",
    "land_area_size",
    "parking_spaces",
    "area_unit",
    "year_built",
    "address.addr1",
    "address.city",
    "address.region",
    "address.country",
    "neighborhood[0]",
    "virtual_tour_url",
];

lazy_static! {
    /// All spreadsheet column names in output order.
    pub static ref HEADERS: Vec<String> = {
        let mut headers: Vec<String> = SCALAR_HEADERS.iter().map(|h| h.to_string()).collect();
        for i in 0..IMAGE_SLOTS {
            headers.push(format!("image[{i}].url"));
            headers.push(format!("image[{i}].tag[0]"));
        }
        headers
    };
}

impl CatalogRow {
    /// Render the row as spreadsheet cells, matching [`struct@HEADERS`] order.
    /// Absent numerics become empty strings; nothing renders as a literal
    /// "null".
    pub fn cells(&self) -> Vec<String> {
        fn num(value: Option<i64>) -> String {
            value.map(|n| n.to_string()).unwrap_or_default()
        }

        let mut cells = vec![
            self.home_listing_id.clone(),
            self.name.clone(),
            self.description.clone(),
            self.availability.as_str().to_string(),
            self.price.clone(),
            self.property_type.clone(),
            self.garden_type.clone(),
            self.url.clone(),
            num(self.num_baths),
            num(self.num_beds),
            num(self.num_rooms),
            self.pet_policy.clone(),
            num(self.area_size),
            num(self.land_area_size),
            num(self.parking_spaces),
            self.area_unit.clone(),
            self.year_built.clone(),
            self.addr1.clone(),
            self.city.clone(),
            self.region.clone(),
            self.country.clone(),
            self.neighborhood.clone(),
            self.virtual_tour_url.clone(),
        ];
        for slot in &self.images {
            cells.push(slot.url.clone());
            cells.push(slot.tag.clone());
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_cover_all_image_slots() {
        assert_eq!(HEADERS.len(), SCALAR_HEADERS.len() + IMAGE_SLOTS * 2);
        assert_eq!(HEADERS[SCALAR_HEADERS.len()], "image[0].url");
        assert_eq!(HEADERS[HEADERS.len() - 1], "image[7].tag[0]");
    }

    #[test]
    fn test_cells_align_with_headers_and_never_render_null() {
        let mut row = CatalogRow {
            home_listing_id: "EB-1".to_string(),
            name: "Casa".to_string(),
            description: String::new(),
            availability: Availability::ForSale,
            price: "100 MXN".to_string(),
            property_type: "house".to_string(),
            garden_type: String::new(),
            url: "https://example.com".to_string(),
            num_baths: Some(2),
            num_beds: None,
            num_rooms: Some(0),
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
        };
        row.images[0] = ImageSlot {
            url: "https://img".to_string(),
            tag: "front".to_string(),
        };

        let cells = row.cells();
        assert_eq!(cells.len(), HEADERS.len());
        assert!(!cells.iter().any(|c| c == "null"));

        let by_header = |name: &str| {
            let i = HEADERS.iter().position(|h| h == name).unwrap();
            cells[i].clone()
        };
        assert_eq!(by_header("availability"), "for_sale");
        assert_eq!(by_header("num_baths"), "2");
        assert_eq!(by_header("num_beds"), "");
        assert_eq!(by_header("num_rooms"), "0");
        assert_eq!(by_header("image[0].url"), "https://img");
        assert_eq!(by_header("image[7].url"), "");
    }
}
