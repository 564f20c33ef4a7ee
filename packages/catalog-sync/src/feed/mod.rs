//! Catalog feed schema and formatting.

pub mod format;
pub mod row;

pub use format::{format_feed, DroppedRow, FeedOutput};
pub use row::{Availability, CatalogRow, ImageSlot, HEADERS, IMAGE_SLOTS};
