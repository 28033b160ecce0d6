//! Domain orchestration for syncing the ledger with the spreadsheet webhook.
//!
//! The service owns the retry loop for writes and the summary cache for
//! reads. Adapters behind [`LedgerWebhook`] only classify wire failures.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{LedgerWebhook, WebhookReply, WebhookRequest};
use crate::domain::{
    DEFAULT_SUMMARY_TTL, Error, PeriodKey, RetryPolicy, RetrySleeper, SummaryCache, SummaryResult,
    TokioSleeper, Transaction,
};

mod mapping;

/// Retry and cache tuning for [`LedgerSyncService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    /// Write retry policy.
    pub retry: RetryPolicy,
    /// Freshness window of the summary cache.
    pub cache_ttl: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            cache_ttl: DEFAULT_SUMMARY_TTL,
        }
    }
}

/// Result of a write that the webhook accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    /// Attempts used, first call included.
    pub attempts: u32,
    /// Server message, when one was sent.
    pub message: Option<String>,
}

/// Sync client for one webhook endpoint.
pub struct LedgerSyncService {
    webhook: Arc<dyn LedgerWebhook>,
    sleeper: Arc<dyn RetrySleeper>,
    policy: RetryPolicy,
    cache: Mutex<SummaryCache>,
}

impl LedgerSyncService {
    /// Build a service that backs off on the Tokio timer.
    pub fn new(webhook: Arc<dyn LedgerWebhook>, clock: Arc<dyn Clock>, config: SyncConfig) -> Self {
        Self::with_sleeper(webhook, clock, Arc::new(TokioSleeper), config)
    }

    /// Build a service with an injected sleeper.
    pub fn with_sleeper(
        webhook: Arc<dyn LedgerWebhook>,
        clock: Arc<dyn Clock>,
        sleeper: Arc<dyn RetrySleeper>,
        config: SyncConfig,
    ) -> Self {
        Self {
            webhook,
            sleeper,
            policy: config.retry,
            cache: Mutex::new(SummaryCache::new(config.cache_ttl, clock)),
        }
    }

    /// Post a write, retrying transient failures with exponential backoff.
    ///
    /// Acceptance invalidates the summary cache. Any failure, including an
    /// error-flagged reply, leaves the cache untouched.
    pub async fn send(&self, request: &WebhookRequest) -> Result<SendOutcome, Error> {
        let action = request.action();
        let max_attempts = self.policy.attempts();

        for attempt in 1..=max_attempts {
            debug!(action, attempt, max_attempts, "posting webhook request");
            match self.webhook.post(request).await {
                Ok(reply) => {
                    self.lock_cache()?.invalidate();
                    debug!(action, "summary cache invalidated");
                    let message = match reply {
                        WebhookReply::Acknowledged { message } => message,
                        WebhookReply::Summary(_) => None,
                    };
                    info!(action, attempt, "webhook accepted request");
                    return Ok(SendOutcome {
                        attempts: attempt,
                        message,
                    });
                }
                Err(error) if self.policy.should_retry(&error, attempt) => {
                    let delay = self.policy.delay_for(attempt);
                    warn!(
                        action,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        %error,
                        "webhook attempt failed; backing off"
                    );
                    self.sleeper.sleep(delay).await;
                }
                Err(error) => {
                    warn!(action, attempt, %error, "webhook request failed");
                    return Err(mapping::map_webhook_error(error, attempt));
                }
            }
        }

        Err(Error::internal("unreachable webhook retry state encountered"))
    }

    /// Totals for `period`, served from cache while fresh.
    ///
    /// A miss costs exactly one request; reads are not retried.
    pub async fn get_summary(&self, period: PeriodKey) -> Result<SummaryResult, Error> {
        if let Some(summary) = self.lock_cache()?.get(period) {
            debug!(%period, "summary cache hit");
            return Ok(summary);
        }
        debug!(%period, "summary cache miss");

        let request = WebhookRequest::GetSummary { sheet_name: period };
        let reply = self
            .webhook
            .post(&request)
            .await
            .map_err(|error| mapping::map_webhook_error(error, 1))?;
        let WebhookReply::Summary(summary) = reply else {
            return Err(Error::protocol(format!(
                "webhook returned no summary for {period}"
            )));
        };
        self.lock_cache()?.put(period, summary.clone());
        Ok(summary)
    }

    /// Append `transaction` to its month sheet.
    pub async fn record_transaction(&self, transaction: &Transaction) -> Result<SendOutcome, Error> {
        self.send(&WebhookRequest::add_transaction(transaction))
            .await
    }

    /// Probe the endpoint.
    pub async fn test_connection(&self) -> Result<SendOutcome, Error> {
        self.send(&WebhookRequest::TestConnection).await
    }

    fn lock_cache(&self) -> Result<MutexGuard<'_, SummaryCache>, Error> {
        self.cache
            .lock()
            .map_err(|_| Error::internal("summary cache poisoned"))
    }
}
