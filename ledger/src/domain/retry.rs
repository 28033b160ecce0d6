//! Exponential backoff policy for webhook writes.

use std::time::Duration;

use async_trait::async_trait;

use super::ports::WebhookError;

/// Attempt ceiling and backoff bounds.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use ledger::domain::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.delay_for(1), Duration::from_secs(1));
/// assert_eq!(policy.delay_for(2), Duration::from_secs(2));
/// assert_eq!(policy.delay_for(10), Duration::from_secs(8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, first call included.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub initial_backoff: Duration,
    /// Upper bound for any single delay.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    /// Attempt ceiling, never below one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = 2_u32.saturating_pow(attempt.saturating_sub(1));
        let base_ms = u64::try_from(self.initial_backoff.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(self.max_backoff.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(base_ms.saturating_mul(u64::from(exponent)).min(max_ms))
    }

    /// Whether `error` from attempt number `attempt` earns another try.
    pub fn should_retry(&self, error: &WebhookError, attempt: u32) -> bool {
        error.is_retryable() && attempt < self.attempts()
    }
}

/// Async sleeping abstraction so backoff can be observed in tests.
#[async_trait]
pub trait RetrySleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl RetrySleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(250),
        }
    }

    #[rstest]
    #[case(1, 100)]
    #[case(2, 200)]
    #[case(3, 250)]
    #[case(40, 250)]
    fn delay_doubles_up_to_cap(#[case] attempt: u32, #[case] millis: u64) {
        assert_eq!(policy().delay_for(attempt), Duration::from_millis(millis));
    }

    #[rstest]
    #[case(WebhookError::timeout("slow"), 1, true)]
    #[case(WebhookError::timeout("slow"), 2, true)]
    #[case(WebhookError::timeout("slow"), 3, false)]
    #[case(WebhookError::rate_limited("429"), 2, true)]
    #[case(WebhookError::unauthorized("401"), 1, false)]
    #[case(WebhookError::rejected("locked"), 1, false)]
    fn retries_transient_errors_below_ceiling(
        #[case] error: WebhookError,
        #[case] attempt: u32,
        #[case] expected: bool,
    ) {
        assert_eq!(policy().should_retry(&error, attempt), expected);
    }

    #[rstest]
    fn zero_attempts_still_allows_one_call() {
        let policy = RetryPolicy {
            max_attempts: 0,
            ..policy()
        };
        assert_eq!(policy.attempts(), 1);
        assert!(!policy.should_retry(&WebhookError::timeout("slow"), 1));
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_sleeper_waits_on_the_timer() {
        let started = tokio::time::Instant::now();
        TokioSleeper.sleep(Duration::from_secs(2)).await;
        assert!(started.elapsed() >= Duration::from_secs(2));
    }
}
