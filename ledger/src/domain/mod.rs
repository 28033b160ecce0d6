//! Domain primitives, aggregation, and webhook sync orchestration.
//!
//! Public surface:
//! - Transaction model: [`Transaction`], [`TransactionDraft`], [`Category`],
//!   [`TransactionKind`], and [`PeriodKey`] naming the month sheet.
//! - Validation: [`validate_amount`], [`validate_date`], [`validate_note`].
//! - Aggregation: [`totals`], [`by_category`], [`percentage_breakdown`],
//!   [`monthly_trend`], [`TransactionFilter`].
//! - Sync: [`LedgerSyncService`] with its [`RetryPolicy`] and [`SummaryCache`].
//! - Errors: [`Error`] with a stable [`ErrorCode`].

pub mod aggregate;
pub mod budget;
pub mod error;
pub mod ledger;
pub mod period;
pub mod ports;
pub mod retry;
pub mod summary;
pub mod summary_cache;
pub mod sync_service;
pub mod transaction;
pub mod validation;

pub use self::aggregate::{
    Totals, TransactionFilter, by_category, monthly_trend, percentage_breakdown, totals,
};
pub use self::budget::{BudgetKey, MonthlyBudget};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ledger::SessionLedger;
pub use self::period::PeriodKey;
pub use self::retry::{RetryPolicy, RetrySleeper, TokioSleeper};
pub use self::summary::SummaryResult;
pub use self::summary_cache::{DEFAULT_SUMMARY_TTL, SummaryCache};
pub use self::sync_service::{LedgerSyncService, SendOutcome, SyncConfig};
pub use self::transaction::{
    Amount, Category, ExpenseCategory, IncomeCategory, Transaction, TransactionDraft,
    TransactionKind,
};
pub use self::validation::{
    MAX_AMOUNT, NOTE_MAX_CHARS, ValidationError, earliest_date, today, validate_amount,
    validate_date, validate_note,
};

/// Convenient domain result alias.
pub type DomainResult<T> = Result<T, Error>;
