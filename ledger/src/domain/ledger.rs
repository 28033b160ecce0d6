//! In-memory session ledger.

use std::collections::BTreeSet;

use super::{PeriodKey, Transaction};

/// Append-only list of transactions recorded during one session.
///
/// Nothing is persisted; dropping the ledger discards its contents.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ledger::domain::{Category, IncomeCategory, SessionLedger, Transaction, TransactionDraft};
///
/// let day = NaiveDate::from_ymd_opt(2026, 5, 1).expect("valid date");
/// let salary = Transaction::try_new(
///     TransactionDraft {
///         date: day,
///         category: Category::Income(IncomeCategory::Salary),
///         subcategory: None,
///         amount: 9_000_000,
///         note: String::new(),
///     },
///     day,
/// )
/// .expect("valid draft");
///
/// let mut ledger = SessionLedger::default();
/// ledger.record(salary);
/// assert_eq!(ledger.len(), 1);
/// assert_eq!(ledger.months()[0].to_string(), "05/2026");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionLedger {
    transactions: Vec<Transaction>,
}

impl SessionLedger {
    /// Append one transaction.
    pub fn record(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Everything recorded, in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The last `count` recorded transactions, newest last.
    pub fn recent(&self, count: usize) -> &[Transaction] {
        let start = self.transactions.len().saturating_sub(count);
        self.transactions.get(start..).unwrap_or_default()
    }

    /// Distinct months with at least one transaction, newest first.
    pub fn months(&self) -> Vec<PeriodKey> {
        let months: BTreeSet<PeriodKey> = self
            .transactions
            .iter()
            .map(Transaction::period)
            .collect();
        months.into_iter().rev().collect()
    }

    /// Transactions dated inside `period`, in insertion order.
    pub fn in_month(&self, period: PeriodKey) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|transaction| period.contains(transaction.date()))
            .collect()
    }

    /// Number of recorded transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
