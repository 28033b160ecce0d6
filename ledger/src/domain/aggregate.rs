//! Stateless income/expense aggregation over a snapshot of transactions.

use std::collections::BTreeMap;

use super::{Category, PeriodKey, Transaction, TransactionKind};

/// Income, expense, and the balance between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Sum of income amounts.
    pub income: u64,
    /// Sum of expense amounts.
    pub expense: u64,
    /// `income - expense`; negative when overspent.
    pub balance: i64,
}

impl Totals {
    /// Totals as an `(income, expense, balance)` tuple.
    pub fn as_tuple(self) -> (u64, u64, i64) {
        (self.income, self.expense, self.balance)
    }

    fn add(&mut self, kind: TransactionKind, amount: u64) {
        match kind {
            TransactionKind::Income => self.income = self.income.saturating_add(amount),
            TransactionKind::Expense => self.expense = self.expense.saturating_add(amount),
        }
        self.balance = signed(self.income).saturating_sub(signed(self.expense));
    }
}

fn signed(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

/// Sum income and expense amounts.
///
/// # Examples
///
/// ```
/// use ledger::domain::{Totals, Transaction, totals};
///
/// let none: Vec<Transaction> = Vec::new();
/// assert_eq!(totals(&none), Totals::default());
/// ```
pub fn totals<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold(Totals::default(), |mut acc, transaction| {
            acc.add(transaction.kind(), transaction.amount().value());
            acc
        })
}

/// Sum amounts per category for transactions of `kind`.
pub fn by_category<'a, I>(transactions: I, kind: TransactionKind) -> BTreeMap<Category, u64>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut sums = BTreeMap::new();
    for transaction in transactions
        .into_iter()
        .filter(|transaction| transaction.kind() == kind)
    {
        let entry = sums.entry(transaction.category()).or_insert(0_u64);
        *entry = entry.saturating_add(transaction.amount().value());
    }
    sums
}

/// Share of `total` per key, as a percentage rounded to one decimal.
///
/// Returns `None` when `total` is zero.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use ledger::domain::percentage_breakdown;
///
/// let amounts = BTreeMap::from([("A", 30_u64), ("B", 70_u64)]);
/// let shares = percentage_breakdown(&amounts, 100).expect("non-zero total");
/// assert_eq!(shares, BTreeMap::from([("A", 30.0), ("B", 70.0)]));
/// assert!(percentage_breakdown(&amounts, 0).is_none());
/// ```
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "shares are rounded presentation values"
)]
pub fn percentage_breakdown<K>(amounts: &BTreeMap<K, u64>, total: u64) -> Option<BTreeMap<K, f64>>
where
    K: Ord + Clone,
{
    if total == 0 {
        return None;
    }
    let total = total as f64;
    Some(
        amounts
            .iter()
            .map(|(key, amount)| (key.clone(), round_to_tenth(*amount as f64 / total * 100.0)))
            .collect(),
    )
}

/// Income and expense totals per month, oldest first.
pub fn monthly_trend<'a, I>(transactions: I) -> BTreeMap<PeriodKey, Totals>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut months: BTreeMap<PeriodKey, Totals> = BTreeMap::new();
    for transaction in transactions {
        months
            .entry(transaction.period())
            .or_default()
            .add(transaction.kind(), transaction.amount().value());
    }
    months
}

#[expect(clippy::float_arithmetic, reason = "one-decimal rounding")]
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Report filter over month, type, and category. Empty lists match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Restrict to one month.
    pub period: Option<PeriodKey>,
    /// Restrict to these transaction types.
    pub kinds: Vec<TransactionKind>,
    /// Restrict to these categories.
    pub categories: Vec<Category>,
}

impl TransactionFilter {
    /// Whether `transaction` passes every configured restriction.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.period
            .is_none_or(|period| period.contains(transaction.date()))
            && (self.kinds.is_empty() || self.kinds.contains(&transaction.kind()))
            && (self.categories.is_empty() || self.categories.contains(&transaction.category()))
    }

    /// Matching transactions, newest date first.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        let mut selected: Vec<&Transaction> = transactions
            .iter()
            .filter(|transaction| self.matches(transaction))
            .collect();
        selected.sort_by(|left, right| right.date().cmp(&left.date()));
        selected
    }
}

#[cfg(test)]
mod tests {
    //! Covers totals, grouping, percentages, and report filters.

    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{ExpenseCategory, IncomeCategory, TransactionDraft};

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn record(date: NaiveDate, category: Category, amount: i64) -> Transaction {
        Transaction::try_new(
            TransactionDraft {
                date,
                category,
                subcategory: None,
                amount,
                note: String::new(),
            },
            ymd(2026, 10, 14),
        )
        .expect("valid transaction")
    }

    const SALARY: Category = Category::Income(IncomeCategory::Salary);
    const FOOD: Category = Category::Expense(ExpenseCategory::Food);
    const RENT: Category = Category::Expense(ExpenseCategory::Housing);

    #[fixture]
    fn ledger() -> Vec<Transaction> {
        vec![
            record(ymd(2026, 9, 1), SALARY, 10_000_000),
            record(ymd(2026, 9, 3), RENT, 3_000_000),
            record(ymd(2026, 9, 20), FOOD, 1_000_000),
            record(ymd(2026, 10, 2), FOOD, 250_000),
            record(ymd(2026, 10, 5), FOOD, 750_000),
        ]
    }

    #[rstest]
    fn empty_input_yields_zero_totals() {
        let none: [Transaction; 0] = [];
        assert_eq!(totals(&none).as_tuple(), (0, 0, 0));
    }

    #[rstest]
    fn income_minus_expense_is_balance() {
        let pair = [
            record(ymd(2026, 10, 1), SALARY, 100),
            record(ymd(2026, 10, 1), FOOD, 40),
        ];
        assert_eq!(totals(&pair).as_tuple(), (100, 40, 60));
    }

    #[rstest]
    fn balance_goes_negative_when_overspent() {
        let pair = [
            record(ymd(2026, 10, 1), SALARY, 40),
            record(ymd(2026, 10, 1), FOOD, 100),
        ];
        assert_eq!(totals(&pair).balance, -60);
    }

    #[rstest]
    fn groups_expenses_by_category(ledger: Vec<Transaction>) {
        let sums = by_category(&ledger, TransactionKind::Expense);
        assert_eq!(sums, BTreeMap::from([(FOOD, 2_000_000), (RENT, 3_000_000)]));
    }

    #[rstest]
    fn income_grouping_ignores_expenses(ledger: Vec<Transaction>) {
        let sums = by_category(&ledger, TransactionKind::Income);
        assert_eq!(sums, BTreeMap::from([(SALARY, 10_000_000)]));
    }

    #[rstest]
    fn percentages_round_to_one_decimal() {
        let amounts = BTreeMap::from([("food", 1_u64), ("rent", 2_u64)]);
        let shares = percentage_breakdown(&amounts, 3).expect("non-zero total");
        assert_eq!(shares, BTreeMap::from([("food", 33.3), ("rent", 66.7)]));
    }

    #[rstest]
    fn zero_total_has_no_breakdown() {
        let amounts = BTreeMap::from([("food", 0_u64)]);
        assert!(percentage_breakdown(&amounts, 0).is_none());
    }

    #[rstest]
    fn trend_groups_by_month(ledger: Vec<Transaction>) {
        let trend = monthly_trend(&ledger);
        let september = PeriodKey::new(2026, 9).expect("valid period");
        let october = PeriodKey::new(2026, 10).expect("valid period");
        assert_eq!(trend.keys().copied().collect::<Vec<_>>(), [september, october]);
        assert_eq!(trend[&september].as_tuple(), (10_000_000, 4_000_000, 6_000_000));
        assert_eq!(trend[&october].as_tuple(), (0, 1_000_000, -1_000_000));
    }

    #[rstest]
    fn filter_combines_restrictions_and_sorts_newest_first(ledger: Vec<Transaction>) {
        let filter = TransactionFilter {
            period: Some(PeriodKey::new(2026, 10).expect("valid period")),
            kinds: vec![TransactionKind::Expense],
            categories: vec![FOOD],
        };
        let selected = filter.apply(&ledger);
        let dates: Vec<_> = selected.iter().map(|transaction| transaction.date()).collect();
        assert_eq!(dates, [ymd(2026, 10, 5), ymd(2026, 10, 2)]);
        assert_eq!(totals(selected).expense, 1_000_000);
    }

    #[rstest]
    fn default_filter_matches_everything(ledger: Vec<Transaction>) {
        assert_eq!(TransactionFilter::default().apply(&ledger).len(), ledger.len());
    }
}
