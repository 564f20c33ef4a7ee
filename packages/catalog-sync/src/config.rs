use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub easybroker_api_key: String,
    /// Consumed by the Google Sheets sink the embedding host constructs.
    pub google_service_account_email: String,
    pub google_private_key: String,
    /// Override for staging or a local API stub.
    pub easybroker_base_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            easybroker_api_key: env::var("EASYBROKER_API_KEY")
                .context("EASYBROKER_API_KEY must be set")?,
            google_service_account_email: env::var("GOOGLE_SERVICE_ACCOUNT_EMAIL")
                .context("GOOGLE_SERVICE_ACCOUNT_EMAIL must be set")?,
            google_private_key: env::var("GOOGLE_PRIVATE_KEY")
                .context("GOOGLE_PRIVATE_KEY must be set")?,
            easybroker_base_url: env::var("EASYBROKER_BASE_URL").ok(),
        })
    }
}
