//! Advisory monthly budget targets.
//!
//! Budgets are never enforced against recorded transactions; they only feed
//! the projected saving rate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::aggregate::round_to_tenth;

/// Fixed budget lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetKey {
    /// Expected monthly salary.
    Salary,
    /// Food and drink.
    Food,
    /// Getting around.
    Transport,
    /// Rent and housing.
    Accommodation,
    /// Electricity, water, internet.
    Utilities,
    /// Everything else.
    Miscellaneous,
}

impl BudgetKey {
    /// Every budget line, salary first.
    pub const ALL: [Self; 6] = [
        Self::Salary,
        Self::Food,
        Self::Transport,
        Self::Accommodation,
        Self::Utilities,
        Self::Miscellaneous,
    ];
}

/// Target amount per budget line. Lines never set read as zero.
///
/// # Examples
///
/// ```
/// use ledger::domain::{BudgetKey, MonthlyBudget};
///
/// let mut budget = MonthlyBudget::default();
/// budget.set(BudgetKey::Salary, 10_000_000);
/// budget.set(BudgetKey::Food, 3_000_000);
/// budget.set(BudgetKey::Accommodation, 2_000_000);
/// assert_eq!(budget.total_spending(), 5_000_000);
/// assert_eq!(budget.projected_saving_rate(), Some(50.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlyBudget {
    targets: BTreeMap<BudgetKey, u64>,
}

impl MonthlyBudget {
    /// Target for `key`.
    pub fn get(&self, key: BudgetKey) -> u64 {
        self.targets.get(&key).copied().unwrap_or(0)
    }

    /// Replace the target for `key`.
    pub fn set(&mut self, key: BudgetKey, amount: u64) {
        self.targets.insert(key, amount);
    }

    /// Sum of every spending line, salary excluded.
    pub fn total_spending(&self) -> u64 {
        self.targets
            .iter()
            .filter(|(key, _)| **key != BudgetKey::Salary)
            .fold(0_u64, |total, (_, amount)| total.saturating_add(*amount))
    }

    /// Percentage of salary left after planned spending, to one decimal.
    ///
    /// Negative when planned spending exceeds salary; `None` without a salary.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "the rate is a rounded presentation value"
    )]
    pub fn projected_saving_rate(&self) -> Option<f64> {
        let salary = self.get(BudgetKey::Salary);
        if salary == 0 {
            return None;
        }
        let salary = salary as f64;
        let spending = self.total_spending() as f64;
        Some(round_to_tenth((salary - spending) / salary * 100.0))
    }
}
