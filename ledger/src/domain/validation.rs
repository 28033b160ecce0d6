//! Input bounds for amounts, dates, and notes.
//!
//! # Validation Rules
//!
//! - Amount: positive and at most [`MAX_AMOUNT`] currency units
//! - Date: between [`earliest_date`] and today inclusive
//! - Note: at most [`NOTE_MAX_CHARS`] characters
//!
//! "Today" is always passed in by the caller so these checks stay pure. Use
//! [`today`] to derive it from an injected clock.

use chrono::NaiveDate;
use mockable::Clock;
use thiserror::Error;

use super::Error as DomainError;

/// Largest amount accepted for one transaction.
pub const MAX_AMOUNT: i64 = 1_000_000_000;

/// Maximum note length in characters.
pub const NOTE_MAX_CHARS: usize = 200;

/// Reasons a transaction input is rejected before submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Amount was zero or negative.
    #[error("amount must be positive")]
    AmountNotPositive,

    /// Amount was above [`MAX_AMOUNT`].
    #[error("amount exceeds maximum of {max}")]
    AmountExceedsMaximum {
        /// Largest accepted amount.
        max: i64,
    },

    /// Date lies after today.
    #[error("future date not allowed: {date}")]
    FutureDate {
        /// Rejected date.
        date: NaiveDate,
    },

    /// Date lies before the earliest supported day.
    #[error("date too old: {date} is before {earliest}")]
    DateTooOld {
        /// Rejected date.
        date: NaiveDate,
        /// Earliest accepted date.
        earliest: NaiveDate,
    },

    /// Note exceeds [`NOTE_MAX_CHARS`].
    #[error("note must be at most {max} characters, got {actual}")]
    NoteTooLong {
        /// Maximum accepted length.
        max: usize,
        /// Length of the rejected note.
        actual: usize,
    },

    /// Category name is not offered for the transaction type.
    #[error("unknown {kind} category: {value}")]
    UnknownCategory {
        /// Transaction type label.
        kind: &'static str,
        /// Rejected category name.
        value: String,
    },

    /// Period key is not a valid `MM/YYYY` month.
    #[error("period must be formatted as MM/YYYY, got '{value}'")]
    InvalidPeriod {
        /// Rejected input.
        value: String,
    },
}

/// Earliest calendar day a transaction may carry (2020-01-01).
pub fn earliest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Check that `amount` is positive and within [`MAX_AMOUNT`].
///
/// # Examples
///
/// ```
/// use ledger::domain::{ValidationError, validate_amount};
///
/// assert!(validate_amount(50_000).is_ok());
/// assert_eq!(validate_amount(0), Err(ValidationError::AmountNotPositive));
/// ```
pub fn validate_amount(amount: i64) -> Result<(), ValidationError> {
    if amount <= 0 {
        return Err(ValidationError::AmountNotPositive);
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountExceedsMaximum { max: MAX_AMOUNT });
    }
    Ok(())
}

/// Check that `date` falls within `[earliest_date(), today]`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ledger::domain::validate_date;
///
/// let today = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
/// assert!(validate_date(today, today).is_ok());
/// assert!(validate_date(today.succ_opt().expect("valid date"), today).is_err());
/// ```
pub fn validate_date(date: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if date > today {
        return Err(ValidationError::FutureDate { date });
    }
    let earliest = earliest_date();
    if date < earliest {
        return Err(ValidationError::DateTooOld { date, earliest });
    }
    Ok(())
}

/// Check that `note` fits within [`NOTE_MAX_CHARS`].
pub fn validate_note(note: &str) -> Result<(), ValidationError> {
    let actual = note.chars().count();
    if actual > NOTE_MAX_CHARS {
        return Err(ValidationError::NoteTooLong {
            max: NOTE_MAX_CHARS,
            actual,
        });
    }
    Ok(())
}

/// The user's current calendar day according to `clock`.
pub fn today(clock: &dyn Clock) -> NaiveDate {
    clock.local().date_naive()
}

impl From<ValidationError> for DomainError {
    fn from(error: ValidationError) -> Self {
        DomainError::validation(error.to_string())
    }
}
