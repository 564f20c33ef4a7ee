//! EasyBroker to Meta catalog feed synchronization.
//!
//! Pulls property listings from the EasyBroker API, fans out per-property
//! detail fetches, reshapes everything into the Meta catalog feed schema, and
//! writes the rows into a spreadsheet sink, optionally resetting prior
//! content.
//!
//! The transport wrappers (Lambda function URL, MCP tool) and the real Google
//! Sheets client live with the embedding host; this crate owns everything in
//! between, behind the [`sink::CatalogSink`] seam.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_sync::{Config, SyncRequest, SyncService};
//! use catalog_sync::sink::MemorySink;
//! use easybroker_client::EasyBrokerClient;
//!
//! let config = Config::from_env()?;
//! let api = EasyBrokerClient::new(config.easybroker_api_key);
//! let service = SyncService::new(api, MemorySink::new());
//!
//! let request: SyncRequest = serde_json::from_str(body)?;
//! let outcome = service.run_to_outcome(&request).await;
//! ```

pub mod config;
pub mod error;
pub mod feed;
pub mod request;
pub mod response;
pub mod sink;
pub mod sync;

pub use config::Config;
pub use error::SyncError;
pub use feed::{format_feed, CatalogRow, DroppedRow, FeedOutput};
pub use request::{SyncPlan, SyncRequest};
pub use response::{SyncOutcome, SyncReport};
pub use sync::SyncService;
