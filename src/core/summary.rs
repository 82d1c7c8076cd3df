//! Read-only spending aggregates for dashboards.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    insights::percentage,
    ledger::{time_window::last_of_month, CategoryKey, DateWindow, Expense, Ledger},
};

/// Month-to-date position against the monthly budget.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SpendingOverview {
    pub month: DateWindow,
    pub week: DateWindow,
    pub monthly_budget: Decimal,
    pub monthly_spent: Decimal,
    pub weekly_spent: Decimal,
    pub monthly_remaining: Decimal,
    pub days_left: u32,
    /// What can still be spent per remaining day; zero once over budget.
    pub daily_allowance: Decimal,
    pub recent: Vec<Expense>,
}

impl SpendingOverview {
    pub fn compute(ledger: &Ledger, now: DateTime<Utc>, recent_limit: usize) -> Self {
        let month = DateWindow::month_of(now);
        let week = DateWindow::week_of(now);
        let monthly_spent = ledger.total_in(&month);
        let weekly_spent = ledger.total_in(&week);
        let monthly_budget = ledger.budget().monthly;
        let monthly_remaining = monthly_budget - monthly_spent;

        let today = now.date_naive();
        let days_left = last_of_month(today).day() - today.day();
        let daily_allowance = if monthly_remaining > Decimal::ZERO {
            monthly_remaining / Decimal::from(days_left.max(1))
        } else {
            Decimal::ZERO
        };

        Self {
            month,
            week,
            monthly_budget,
            monthly_spent,
            weekly_spent,
            monthly_remaining,
            days_left,
            daily_allowance,
            recent: ledger.recent(recent_limit).to_vec(),
        }
    }
}

/// Utilization of one category's limit.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: CategoryKey,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    /// `None` when the category has no limit set.
    pub utilization: Option<Decimal>,
}

/// One row per category, in declaration order.
pub fn category_breakdown(ledger: &Ledger) -> Vec<CategorySummary> {
    ledger
        .budget()
        .categories
        .iter()
        .map(|(category, entry)| CategorySummary {
            category,
            limit: entry.limit,
            spent: entry.spent,
            remaining: entry.remaining(),
            utilization: percentage(entry.spent, entry.limit),
        })
        .collect()
}
