//! Transaction data model.
//!
//! A [`Transaction`] can only be built through [`Transaction::try_new`], which
//! runs the validator. That keeps every recorded transaction positive, dated
//! no later than today, and categorised within its own type.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::PeriodKey;
use super::validation::{ValidationError, validate_amount, validate_date, validate_note};

/// Direction of money flow. Wire names follow the spreadsheet columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money received.
    #[serde(rename = "Thu")]
    Income,
    /// Money spent.
    #[serde(rename = "Chi")]
    Expense,
}

impl TransactionKind {
    /// Label written to the webhook `type` field.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Income => "Thu",
            Self::Expense => "Chi",
        }
    }

    /// Lowercase English name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Categories offered for income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IncomeCategory {
    /// Regular salary.
    Salary,
    /// Bonus payments.
    Bonus,
    /// Anything else received.
    Other,
}

/// Categories offered for spending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExpenseCategory {
    /// Meals and drinks.
    Food,
    /// Fuel, buses, taxis, repairs.
    Transport,
    /// Rent and deposits.
    Housing,
    /// Electricity, water, internet, gas.
    Utilities,
    /// Medical, shopping, entertainment.
    Incidentals,
    /// Anything else spent.
    Other,
}

impl ExpenseCategory {
    /// Subcategories suggested for this category.
    pub fn suggested_subcategories(self) -> &'static [&'static str] {
        match self {
            Self::Food => &["Ăn sáng", "Ăn trưa", "Ăn tối", "Đồ uống", "Ăn vặt"],
            Self::Transport => &["Xăng xe", "Xe bus", "Grab/Taxi", "Sửa xe"],
            Self::Housing => &["Tiền thuê", "Tiền cọc", "Chi phí khác"],
            Self::Utilities => &["Tiền điện", "Tiền nước", "Internet", "Gas"],
            Self::Incidentals => &["Y tế", "Mua sắm", "Giải trí", "Khác"],
            Self::Other => &["Khác"],
        }
    }
}

/// A category together with the transaction type it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// An income category.
    Income(IncomeCategory),
    /// An expense category.
    Expense(ExpenseCategory),
}

const INCOME_CATEGORIES: [(IncomeCategory, &str, &str); 3] = [
    (IncomeCategory::Salary, "salary", "Lương"),
    (IncomeCategory::Bonus, "bonus", "Thưởng"),
    (IncomeCategory::Other, "other", "Thu nhập khác"),
];

const EXPENSE_CATEGORIES: [(ExpenseCategory, &str, &str); 6] = [
    (ExpenseCategory::Food, "food", "Ăn uống"),
    (ExpenseCategory::Transport, "transport", "Di chuyển"),
    (ExpenseCategory::Housing, "housing", "Trọ/Nhà ở"),
    (ExpenseCategory::Utilities, "utilities", "Điện nước"),
    (ExpenseCategory::Incidentals, "incidentals", "Phí phát sinh"),
    (ExpenseCategory::Other, "other", "Chi tiêu khác"),
];

impl Category {
    /// Transaction type this category belongs to.
    pub fn kind(self) -> TransactionKind {
        match self {
            Self::Income(_) => TransactionKind::Income,
            Self::Expense(_) => TransactionKind::Expense,
        }
    }

    /// Spreadsheet label sent on the wire.
    pub fn label(self) -> &'static str {
        match self {
            Self::Income(category) => INCOME_CATEGORIES
                .iter()
                .find(|(candidate, _, _)| *candidate == category)
                .map_or("Thu nhập khác", |(_, _, label)| *label),
            Self::Expense(category) => EXPENSE_CATEGORIES
                .iter()
                .find(|(candidate, _, _)| *candidate == category)
                .map_or("Chi tiêu khác", |(_, _, label)| *label),
        }
    }

    /// Every category offered for `kind`, in presentation order.
    pub fn all(kind: TransactionKind) -> Vec<Self> {
        match kind {
            TransactionKind::Income => INCOME_CATEGORIES
                .iter()
                .map(|(category, _, _)| Self::Income(*category))
                .collect(),
            TransactionKind::Expense => EXPENSE_CATEGORIES
                .iter()
                .map(|(category, _, _)| Self::Expense(*category))
                .collect(),
        }
    }

    /// Resolve a category of `kind` from its English slug or spreadsheet label.
    ///
    /// Slugs are matched case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger::domain::{Category, ExpenseCategory, TransactionKind};
    ///
    /// let food = Category::parse(TransactionKind::Expense, "Food").expect("known");
    /// assert_eq!(food, Category::Expense(ExpenseCategory::Food));
    /// assert_eq!(Category::parse(TransactionKind::Expense, "Ăn uống"), Ok(food));
    /// assert!(Category::parse(TransactionKind::Income, "food").is_err());
    /// ```
    pub fn parse(kind: TransactionKind, raw: &str) -> Result<Self, ValidationError> {
        let wanted = raw.trim();
        let matches =
            |slug: &str, label: &str| slug.eq_ignore_ascii_case(wanted) || label == wanted;
        let found = match kind {
            TransactionKind::Income => INCOME_CATEGORIES
                .iter()
                .find(|(_, slug, label)| matches(*slug, *label))
                .map(|(category, _, _)| Self::Income(*category)),
            TransactionKind::Expense => EXPENSE_CATEGORIES
                .iter()
                .find(|(_, slug, label)| matches(*slug, *label))
                .map(|(category, _, _)| Self::Expense(*category)),
        };
        found.ok_or_else(|| ValidationError::UnknownCategory {
            kind: kind.name(),
            value: wanted.to_owned(),
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A positive amount of currency units, at most [`super::MAX_AMOUNT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    /// Validate and wrap a raw amount.
    pub fn new(raw: i64) -> Result<Self, ValidationError> {
        validate_amount(raw)?;
        u64::try_from(raw)
            .map(Self)
            .map_err(|_| ValidationError::AmountNotPositive)
    }

    /// The amount in whole currency units.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unvalidated form input for one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    /// Calendar day of the transaction.
    pub date: NaiveDate,
    /// Category, which also fixes the transaction type.
    pub category: Category,
    /// Optional free-text subcategory.
    pub subcategory: Option<String>,
    /// Raw amount as typed.
    pub amount: i64,
    /// Optional note; empty means none.
    pub note: String,
}

/// A validated income or expense record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    date: NaiveDate,
    category: Category,
    subcategory: Option<String>,
    amount: Amount,
    note: String,
}

impl Transaction {
    /// Validate `draft` against `today` and build the transaction.
    ///
    /// Blank subcategories are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use ledger::domain::{Category, IncomeCategory, Transaction, TransactionDraft};
    ///
    /// let today = NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date");
    /// let draft = TransactionDraft {
    ///     date: today,
    ///     category: Category::Income(IncomeCategory::Salary),
    ///     subcategory: None,
    ///     amount: 12_000_000,
    ///     note: "March pay".to_owned(),
    /// };
    /// let transaction = Transaction::try_new(draft, today).expect("valid draft");
    /// assert_eq!(transaction.amount().value(), 12_000_000);
    /// ```
    pub fn try_new(draft: TransactionDraft, today: NaiveDate) -> Result<Self, ValidationError> {
        let TransactionDraft {
            date,
            category,
            subcategory,
            amount,
            note,
        } = draft;
        let amount = Amount::new(amount)?;
        validate_date(date, today)?;
        validate_note(&note)?;
        let subcategory = subcategory
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());
        Ok(Self {
            date,
            category,
            subcategory,
            amount,
            note,
        })
    }

    /// Calendar day of the transaction.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Income or expense.
    pub fn kind(&self) -> TransactionKind {
        self.category.kind()
    }

    /// Category within the transaction's type.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Optional subcategory.
    pub fn subcategory(&self) -> Option<&str> {
        self.subcategory.as_deref()
    }

    /// Validated amount.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Note, possibly empty.
    pub fn note(&self) -> &str {
        self.note.as_str()
    }

    /// Month sheet this transaction belongs to.
    pub fn period(&self) -> PeriodKey {
        PeriodKey::from_date(self.date)
    }
}

#[cfg(test)]
mod tests {
    //! Covers category resolution and transaction construction rules.

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).expect("valid date")
    }

    fn draft(today: NaiveDate, amount: i64) -> TransactionDraft {
        TransactionDraft {
            date: today,
            category: Category::Expense(ExpenseCategory::Transport),
            subcategory: Some("  Xe bus ".to_owned()),
            amount,
            note: String::new(),
        }
    }

    #[rstest]
    fn builds_valid_transaction_and_trims_subcategory(today: NaiveDate) {
        let transaction = Transaction::try_new(draft(today, 7_000), today).expect("valid");
        assert_eq!(transaction.kind(), TransactionKind::Expense);
        assert_eq!(transaction.subcategory(), Some("Xe bus"));
        assert_eq!(transaction.period().to_string(), "10/2026");
    }

    #[rstest]
    fn blank_subcategory_becomes_none(today: NaiveDate) {
        let mut input = draft(today, 7_000);
        input.subcategory = Some("   ".to_owned());
        let transaction = Transaction::try_new(input, today).expect("valid");
        assert_eq!(transaction.subcategory(), None);
    }

    #[rstest]
    fn rejects_zero_amount(today: NaiveDate) {
        let error = Transaction::try_new(draft(today, 0), today).expect_err("zero rejected");
        assert_eq!(error, ValidationError::AmountNotPositive);
    }

    #[rstest]
    fn rejects_future_date(today: NaiveDate) {
        let mut input = draft(today, 1_000);
        input.date = today.succ_opt().expect("valid date");
        let error = Transaction::try_new(input, today).expect_err("future rejected");
        assert!(matches!(error, ValidationError::FutureDate { .. }));
    }

    #[rstest]
    #[case(TransactionKind::Income, 3)]
    #[case(TransactionKind::Expense, 6)]
    fn category_sets_depend_on_kind(#[case] kind: TransactionKind, #[case] expected: usize) {
        let categories = Category::all(kind);
        assert_eq!(categories.len(), expected);
        assert!(categories.iter().all(|category| category.kind() == kind));
    }

    #[rstest]
    fn labels_match_spreadsheet_names() {
        assert_eq!(Category::Income(IncomeCategory::Salary).label(), "Lương");
        assert_eq!(Category::Expense(ExpenseCategory::Housing).label(), "Trọ/Nhà ở");
    }

    #[rstest]
    fn unknown_category_names_the_kind() {
        let error = Category::parse(TransactionKind::Income, "rent").expect_err("unknown");
        assert_eq!(error.to_string(), "unknown income category: rent");
    }

    #[rstest]
    fn kinds_serialise_with_spreadsheet_names() {
        let value = serde_json::to_value([TransactionKind::Income, TransactionKind::Expense])
            .expect("serialise kinds");
        assert_eq!(value, serde_json::json!(["Thu", "Chi"]));
    }

    #[rstest]
    fn every_expense_category_suggests_subcategories() {
        for category in Category::all(TransactionKind::Expense) {
            let Category::Expense(expense) = category else {
                panic!("expense listing returned {category:?}");
            };
            assert!(!expense.suggested_subcategories().is_empty());
        }
    }
}
