//! Ledger configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{Error, RetryPolicy, SyncConfig};

/// Environment variable naming the webhook endpoint.
pub const WEBHOOK_URL_ENV: &str = "LEDGER_WEBHOOK_URL";

/// Settings for reaching the spreadsheet webhook.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LEDGER")]
pub struct LedgerSettings {
    /// Webhook endpoint; sync commands fail without one.
    pub webhook_url: Option<String>,
    /// Per-request timeout in seconds.
    #[ortho_config(default = 30)]
    pub request_timeout_secs: u64,
    /// Write attempts, first call included.
    #[ortho_config(default = 3)]
    pub max_attempts: u32,
    /// Delay after the first failed write, in milliseconds.
    #[ortho_config(default = 1000)]
    pub initial_backoff_ms: u64,
    /// Cap on any single backoff delay, in milliseconds.
    #[ortho_config(default = 8000)]
    pub max_backoff_ms: u64,
    /// Summary cache freshness window in seconds.
    #[ortho_config(default = 300)]
    pub cache_ttl_secs: u64,
}

impl LedgerSettings {
    /// Resolve the endpoint, preferring `override_url` over the configured one.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no URL is set, when it does not
    /// parse, or when its scheme is not HTTP(S).
    pub fn webhook_url(&self, override_url: Option<&str>) -> Result<Url, Error> {
        let raw = override_url
            .or(self.webhook_url.as_deref())
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| {
                Error::configuration(format!(
                    "webhook URL is not set; export {WEBHOOK_URL_ENV} or pass --webhook-url"
                ))
            })?;
        let url = Url::parse(raw)
            .map_err(|error| Error::configuration(format!("invalid webhook URL {raw}: {error}")))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::configuration(format!(
                "webhook URL must use http or https, got {other}"
            ))),
        }
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Write retry policy.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
        }
    }

    /// Retry and cache tuning for the sync service.
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            retry: self.retry_policy(),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
        }
    }
}
