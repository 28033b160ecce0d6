//! Month-level period keys naming one spreadsheet ledger.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// One calendar month, rendered as `MM/YYYY` on the wire.
///
/// Ordering is chronological.
///
/// # Examples
///
/// ```
/// use ledger::domain::PeriodKey;
///
/// let period: PeriodKey = "03/2026".parse().expect("valid period");
/// assert_eq!(period.month(), 3);
/// assert_eq!(period.to_string(), "03/2026");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

impl PeriodKey {
    /// Build a period from a year and a 1-based month.
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) || !(1000..=9999).contains(&year) {
            return Err(ValidationError::InvalidPeriod {
                value: format!("{month:02}/{year}"),
            });
        }
        Ok(Self { year, month })
    }

    /// The period containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Four-digit year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Month number, 1 through 12.
    pub fn month(self) -> u32 {
        self.month
    }

    /// Whether `date` falls inside this period.
    pub fn contains(self, date: NaiveDate) -> bool {
        Self::from_date(date) == self
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

impl FromStr for PeriodKey {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidPeriod {
            value: raw.to_owned(),
        };
        let (month_digits, year_digits) = raw.split_once('/').ok_or_else(invalid)?;
        let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
        if month_digits.len() != 2
            || year_digits.len() != 4
            || !all_digits(month_digits)
            || !all_digits(year_digits)
        {
            return Err(invalid());
        }
        let month = month_digits.parse::<u32>().map_err(|_| invalid())?;
        let year = year_digits.parse::<i32>().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PeriodKey> for String {
    fn from(value: PeriodKey) -> Self {
        value.to_string()
    }
}
