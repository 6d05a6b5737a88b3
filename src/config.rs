use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.apper.io/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the hosted record store
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub project_id: String,
    pub public_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn new(project_id: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            public_key: public_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Reads `APPER_PROJECT_ID`, `APPER_PUBLIC_KEY` and the optional
    /// `APPER_BASE_URL` / `APPER_TIMEOUT_SECS`. A `.env` file is honored.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let project_id = env::var("APPER_PROJECT_ID").context("APPER_PROJECT_ID is not set")?;
        let public_key = env::var("APPER_PUBLIC_KEY").context("APPER_PUBLIC_KEY is not set")?;

        let base_url = env::var("APPER_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout = match env::var("APPER_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("APPER_TIMEOUT_SECS is not a number: {}", raw))?,
            ),
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            project_id,
            public_key,
            base_url,
            timeout,
        })
    }
}
