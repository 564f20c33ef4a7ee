//! Dry-run CLI: sync against the live EasyBroker API into an in-memory sink.
//!
//! Useful for checking filters and row counts before pointing the real
//! spreadsheet sink at a sheet. Prints the sync outcome as JSON.

use anyhow::{Context, Result};
use catalog_sync::sink::MemorySink;
use catalog_sync::{Config, SyncRequest, SyncService};
use clap::Parser;
use easybroker_client::EasyBrokerClient;

#[derive(Parser)]
#[command(name = "dry_run")]
#[command(about = "Run an EasyBroker catalog sync into an in-memory sink")]
struct Cli {
    /// Spreadsheet id to echo through the pipeline (nothing is written to it)
    spreadsheet_id: String,

    /// Status filters (repeatable); defaults to published
    #[arg(long = "status")]
    statuses: Vec<String>,

    /// Property type filters (repeatable); defaults to all
    #[arg(long = "property-type")]
    property_types: Vec<String>,

    /// Fetch an explicit page window instead of the filtered mode
    #[arg(long, requires = "end_page")]
    start_page: Option<u32>,

    #[arg(long, requires = "start_page")]
    end_page: Option<u32>,

    /// Skip the reset clear before appending
    #[arg(long)]
    no_reset: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let mut api = EasyBrokerClient::new(config.easybroker_api_key);
    if let Some(base_url) = config.easybroker_base_url {
        api = api.with_base_url(base_url);
    }

    let service = SyncService::new(api, MemorySink::new());

    let request = SyncRequest {
        spreadsheet_id: Some(cli.spreadsheet_id),
        reset_spreadsheet: Some(!cli.no_reset),
        statuses: (!cli.statuses.is_empty()).then_some(cli.statuses),
        property_types: (!cli.property_types.is_empty()).then_some(cli.property_types),
        start_page: cli.start_page,
        end_page: cli.end_page,
    };

    let outcome = service.run_to_outcome(&request).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
