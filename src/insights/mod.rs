//! Rule-based advisory messages derived from a ledger snapshot.
//!
//! The engine is a pure function of the budget, the expenses, and the clock
//! reading passed in, so repeated calls over the same snapshot agree.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::ledger::{calculate_total, Budget, CategoryKey, DateWindow, Expense};

/// Thresholds the rules compare against. Percentages are on a 0-100 scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InsightRules {
    pub budget_warning_pct: Decimal,
    pub budget_healthy_pct: Decimal,
    pub category_warning_pct: Decimal,
    pub daily_transaction_limit: usize,
}

impl Default for InsightRules {
    fn default() -> Self {
        Self {
            budget_warning_pct: Decimal::from(90),
            budget_healthy_pct: Decimal::from(50),
            category_warning_pct: Decimal::from(90),
            daily_transaction_limit: 3,
        }
    }
}

/// One advisory finding. `Display` renders the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insight {
    NearBudgetLimit,
    HealthyBudget { used_pct: Decimal },
    CategoryNearLimit { category: CategoryKey, used_pct: Decimal },
    BusyDay { transactions: usize },
    StartTracking,
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Insight::NearBudgetLimit => f.write_str(
                "You're close to exceeding your monthly budget. \
                 Consider reducing non-essential expenses.",
            ),
            Insight::HealthyBudget { used_pct } => write!(
                f,
                "You're managing your budget well! You've only used {used_pct:.1}% \
                 of your monthly allowance."
            ),
            Insight::CategoryNearLimit { category, used_pct } => write!(
                f,
                "Warning: You've almost reached your {category} budget ({used_pct:.1}% used)"
            ),
            Insight::BusyDay { .. } => f.write_str(
                "You've made multiple transactions today. \
                 Make sure these align with your financial goals.",
            ),
            Insight::StartTracking => f.write_str(
                "Start tracking your expenses consistently to receive personalized insights.",
            ),
        }
    }
}

/// Applies the rules in order: overall budget, each category in declaration
/// order, today's transaction count, then the fallback when nothing fired.
/// The overall budget rules are skipped when the total overflows.
pub fn derive_insights(
    budget: &Budget,
    expenses: &[Expense],
    now: DateTime<Utc>,
    rules: &InsightRules,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    let total_spent = calculate_total(expenses);
    let budget_pct = total_spent.and_then(|total| percentage(total, budget.monthly));
    if let (Some(total_spent), Some(budget_pct)) = (total_spent, budget_pct) {
        if budget_pct > rules.budget_warning_pct {
            insights.push(Insight::NearBudgetLimit);
        } else if budget_pct < rules.budget_healthy_pct && total_spent > Decimal::ZERO {
            insights.push(Insight::HealthyBudget {
                used_pct: round_pct(budget_pct),
            });
        }
    }

    for (category, entry) in budget.categories.iter() {
        if entry.spent <= Decimal::ZERO {
            continue;
        }
        let Some(category_pct) = percentage(entry.spent, entry.limit) else {
            continue;
        };
        if category_pct > rules.category_warning_pct {
            insights.push(Insight::CategoryNearLimit {
                category,
                used_pct: round_pct(category_pct),
            });
        }
    }

    let today = DateWindow::today(now);
    let transactions = expenses
        .iter()
        .filter(|expense| today.contains(expense.date))
        .count();
    if transactions > rules.daily_transaction_limit {
        insights.push(Insight::BusyDay { transactions });
    }

    if insights.is_empty() {
        insights.push(Insight::StartTracking);
    }

    tracing::debug!(count = insights.len(), "derived insights");
    insights
}

/// Rendered insight messages with the default thresholds.
pub fn generate_insights(budget: &Budget, expenses: &[Expense], now: DateTime<Utc>) -> Vec<String> {
    render(&derive_insights(budget, expenses, now, &InsightRules::default()))
}

pub fn render(insights: &[Insight]) -> Vec<String> {
    insights.iter().map(ToString::to_string).collect()
}

/// `part / whole * 100`, or `None` when `whole` is zero or the result would
/// overflow.
pub fn percentage(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    part.checked_div(whole)?.checked_mul(Decimal::ONE_HUNDRED)
}

fn round_pct(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}
