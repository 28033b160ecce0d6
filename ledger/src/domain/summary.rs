//! Server-computed monthly summary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Aggregate totals for one period as reported by the webhook.
///
/// Treated as opaque: the ledger caches it but does not recompute it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Income recorded on the sheet.
    pub total_income: u64,
    /// Spending recorded on the sheet.
    pub total_expense: u64,
    /// Spending per category label.
    #[serde(default)]
    pub expense_by_category: BTreeMap<String, u64>,
}

impl SummaryResult {
    /// `total_income - total_expense`.
    pub fn balance(&self) -> i64 {
        let income = i64::try_from(self.total_income).unwrap_or(i64::MAX);
        let expense = i64::try_from(self.total_expense).unwrap_or(i64::MAX);
        income.saturating_sub(expense)
    }
}
