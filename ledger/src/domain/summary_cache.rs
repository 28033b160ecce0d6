//! Single-slot cache for the most recent monthly summary.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use mockable::Clock;

use super::{PeriodKey, SummaryResult};

/// Default freshness window for a cached summary.
pub const DEFAULT_SUMMARY_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CachedSummary {
    period: PeriodKey,
    summary: SummaryResult,
    stored_at: DateTime<Utc>,
}

/// Holds at most one summary, tagged with the period it was fetched for.
///
/// An entry answers only queries for its own period, and only while it is
/// younger than `ttl`.
pub struct SummaryCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    slot: Option<CachedSummary>,
}

impl SummaryCache {
    /// Build an empty cache.
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            slot: None,
        }
    }

    /// Freshness window.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached summary for `period` when still fresh.
    pub fn get(&self, period: PeriodKey) -> Option<SummaryResult> {
        let entry = self.slot.as_ref()?;
        if entry.period != period {
            return None;
        }
        let age = self.clock.utc().signed_duration_since(entry.stored_at);
        // A clock that moved backwards leaves a negative age; treat it as stale.
        let age = age.to_std().ok()?;
        (age < self.ttl).then(|| entry.summary.clone())
    }

    /// Replace the slot with `summary` stamped at the current time.
    pub fn put(&mut self, period: PeriodKey, summary: SummaryResult) {
        self.slot = Some(CachedSummary {
            period,
            summary,
            stored_at: self.clock.utc(),
        });
    }

    /// Drop the slot.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    /// Whether the slot holds anything, fresh or not.
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

impl std::fmt::Debug for SummaryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryCache")
            .field("ttl", &self.ttl)
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}
