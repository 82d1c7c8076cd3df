use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    budget::{Budget, BudgetUpdate},
    category::{CategoryKey, Categories},
    expense::{Expense, NewExpense},
    time_window::DateWindow,
};
use crate::errors::{Result, TrackerError};

/// The budget and its expenses kept as one consistent aggregate.
///
/// Every category's `spent` equals the sum of the amounts of the expenses
/// filed under it, and expenses are ordered most-recent-first by date.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ledger {
    budget: Budget,
    expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from persisted halves, repairing totals and ordering.
    /// Returns a description of every repair that was needed.
    pub fn from_parts(budget: Budget, expenses: Vec<Expense>) -> (Self, Vec<String>) {
        let mut ledger = Self { budget, expenses };
        let warnings = ledger.reconcile();
        (ledger, warnings)
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }

    /// Validates and records a new expense, crediting its category.
    ///
    /// Rejects amounts that would push the category or ledger total past
    /// `Decimal::MAX`, so every total over the ledger stays representable.
    pub fn add_expense(&mut self, input: NewExpense, now: DateTime<Utc>) -> Result<Expense> {
        let expense = input.into_expense(now)?;
        let category_spent = self
            .budget
            .categories
            .get(expense.category)
            .spent
            .checked_add(expense.amount);
        let ledger_total = self.calculate_total().checked_add(expense.amount);
        let (Some(category_spent), Some(_)) = (category_spent, ledger_total) else {
            return Err(TrackerError::Validation(format!(
                "amount {} would overflow the {} total",
                expense.amount, expense.category
            )));
        };
        let position = self
            .expenses
            .iter()
            .position(|existing| existing.date <= expense.date)
            .unwrap_or(self.expenses.len());
        self.expenses.insert(position, expense.clone());
        self.budget.categories.get_mut(expense.category).spent = category_spent;
        Ok(expense)
    }

    /// Removes the expense with `id`, reversing its contribution. Unknown ids
    /// are ignored so deletion stays idempotent.
    pub fn delete_expense(&mut self, id: Uuid) -> Option<Expense> {
        let index = self.expenses.iter().position(|expense| expense.id == id)?;
        let removed = self.expenses.remove(index);
        self.budget.categories.get_mut(removed.category).spent -= removed.amount;
        Some(removed)
    }

    /// Shallow-merges `update` into the budget. A replacement category map
    /// keeps its limits; running totals are recomputed from the expenses.
    pub fn update_budget(&mut self, update: BudgetUpdate) -> Result<()> {
        update.validate()?;
        let replaces_categories = update.categories.is_some();
        self.budget.merge(update);
        if replaces_categories {
            self.recompute_spent();
        }
        Ok(())
    }

    /// Replaces the budget with one derived from onboarding goals.
    pub fn set_goals(&mut self, monthly: Decimal, savings_goal: Decimal) -> Result<()> {
        self.budget = Budget::from_goals(monthly, savings_goal)?;
        self.recompute_spent();
        Ok(())
    }

    /// Expenses dated within `[start, end]`, in ledger order. An inverted
    /// range simply matches nothing.
    pub fn expenses_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|expense| expense.date >= start && expense.date <= end)
            .collect()
    }

    pub fn expenses_in(&self, window: &DateWindow) -> Vec<&Expense> {
        self.expenses_between(window.start, window.end)
    }

    /// Expenses recorded on one UTC calendar day.
    pub fn expenses_on(&self, date: NaiveDate) -> Vec<&Expense> {
        self.expenses_in(&DateWindow::day(date))
    }

    pub fn recent(&self, limit: usize) -> &[Expense] {
        &self.expenses[..limit.min(self.expenses.len())]
    }

    /// Sum of every recorded expense. Only a hand-edited document can hold
    /// more than `Decimal::MAX`, in which case the sum saturates.
    pub fn calculate_total(&self) -> Decimal {
        saturating_total(&self.expenses)
    }

    /// Sum of the expenses dated within `window`.
    pub fn total_in(&self, window: &DateWindow) -> Decimal {
        saturating_total(self.expenses_in(window))
    }

    /// Recomputes category totals and restores date ordering.
    pub fn reconcile(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        let before = self.budget.categories.clone();
        self.recompute_spent();
        for (key, entry) in self.budget.categories.iter() {
            let recorded = before.get(key).spent;
            if recorded != entry.spent {
                warnings.push(format!(
                    "category {key} recorded spent {recorded} but expenses sum to {}",
                    entry.spent
                ));
            }
        }
        if !self.is_sorted_by_date() {
            self.expenses.sort_by(|a, b| b.date.cmp(&a.date));
            warnings.push("expenses were not ordered most-recent-first; re-sorted".into());
        }
        warnings
    }

    fn recompute_spent(&mut self) {
        let mut totals = Categories::default();
        for expense in &self.expenses {
            let entry = totals.get_mut(expense.category);
            entry.spent = entry.spent.saturating_add(expense.amount);
        }
        for key in CategoryKey::ALL {
            self.budget.categories.get_mut(key).spent = totals.get(key).spent;
        }
    }

    fn is_sorted_by_date(&self) -> bool {
        self.expenses
            .windows(2)
            .all(|pair| pair[0].date >= pair[1].date)
    }
}

/// Sums the amounts of the given expenses, or `None` if the sum overflows.
pub fn calculate_total<'a, I>(expenses: I) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses
        .into_iter()
        .try_fold(Decimal::ZERO, |total, expense| total.checked_add(expense.amount))
}

fn saturating_total<'a, I>(expenses: I) -> Decimal
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses
        .into_iter()
        .fold(Decimal::ZERO, |total, expense| total.saturating_add(expense.amount))
}
