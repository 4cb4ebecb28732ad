use anyhow::{Context, Result};

use crate::webhook::DEFAULT_TOLERANCE_MINUTES;
use crate::DEFAULT_API_URL;

/// Runtime configuration, read once at startup
#[derive(Clone)]
pub struct Config {
    /// Base URL of the work order API
    pub api_base_url: String,
    pub api_key: String,
    pub organization_id: Option<u64>,
    /// Shared secret for webhook signatures
    pub webhook_secret: String,
    /// Replay window for signed deliveries
    pub tolerance_minutes: i64,
    /// Timeout for calls to the work order API
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load from process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let webhook_secret = get("WEBHOOK_SECRET")
            .context("WEBHOOK_SECRET must be set to verify webhook signatures")?;

        let api_base_url = get("WORKORDER_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        url::Url::parse(&api_base_url)
            .with_context(|| format!("Invalid WORKORDER_API_URL: {}", api_base_url))?;

        let api_key = get("WORKORDER_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("WORKORDER_API_KEY is not set; work order API calls will be rejected");
        }

        let organization_id = get("WORKORDER_ORG_ID")
            .map(|v| v.trim().parse::<u64>())
            .transpose()
            .context("WORKORDER_ORG_ID must be an integer")?;

        let tolerance_minutes = get("WEBHOOK_TOLERANCE_MINUTES")
            .map(|v| v.trim().parse::<i64>())
            .transpose()
            .context("WEBHOOK_TOLERANCE_MINUTES must be an integer")?
            .unwrap_or(DEFAULT_TOLERANCE_MINUTES);

        let http_timeout_secs = get("HTTP_TIMEOUT_SECS")
            .map(|v| v.trim().parse::<u64>())
            .transpose()
            .context("HTTP_TIMEOUT_SECS must be an integer")?
            .unwrap_or(30);

        Ok(Self {
            api_base_url,
            api_key,
            organization_id,
            webhook_secret,
            tolerance_minutes,
            http_timeout_secs,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_base_url", &self.api_base_url)
            .field("organization_id", &self.organization_id)
            .field("tolerance_minutes", &self.tolerance_minutes)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish_non_exhaustive()
    }
}
