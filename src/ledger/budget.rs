use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::Categories;
use crate::errors::{Result, TrackerError};

const WEEKS_PER_MONTH: u32 = 4;
const CATEGORY_COUNT: u32 = 6;

/// Monthly spending plan with one guardrail per category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(default)]
    pub monthly: Decimal,
    #[serde(default)]
    pub weekly: Decimal,
    #[serde(default)]
    pub savings_goal: Decimal,
    #[serde(default)]
    pub categories: Categories,
}

impl Budget {
    /// Derives a full budget from onboarding goals: an approximate weekly
    /// figure and an even split of the monthly amount across categories.
    pub fn from_goals(monthly: Decimal, savings_goal: Decimal) -> Result<Self> {
        ensure_non_negative("monthly budget", monthly)?;
        ensure_non_negative("savings goal", savings_goal)?;
        Ok(Self {
            monthly,
            weekly: monthly / Decimal::from(WEEKS_PER_MONTH),
            savings_goal,
            categories: Categories::uniform(monthly / Decimal::from(CATEGORY_COUNT)),
        })
    }

    /// Shallow merge: only the supplied fields replace current values.
    pub fn merge(&mut self, update: BudgetUpdate) {
        if let Some(monthly) = update.monthly {
            self.monthly = monthly;
        }
        if let Some(weekly) = update.weekly {
            self.weekly = weekly;
        }
        if let Some(savings_goal) = update.savings_goal {
            self.savings_goal = savings_goal;
        }
        if let Some(categories) = update.categories {
            self.categories = categories;
        }
    }
}

/// Partial budget used by `Ledger::update_budget`.
///
/// `categories`, when present, replaces the whole category map.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_goal: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Categories>,
}

impl BudgetUpdate {
    pub fn monthly(mut self, value: Decimal) -> Self {
        self.monthly = Some(value);
        self
    }

    pub fn weekly(mut self, value: Decimal) -> Self {
        self.weekly = Some(value);
        self
    }

    pub fn savings_goal(mut self, value: Decimal) -> Self {
        self.savings_goal = Some(value);
        self
    }

    pub fn categories(mut self, value: Categories) -> Self {
        self.categories = Some(value);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(value) = self.monthly {
            ensure_non_negative("monthly budget", value)?;
        }
        if let Some(value) = self.weekly {
            ensure_non_negative("weekly budget", value)?;
        }
        if let Some(value) = self.savings_goal {
            ensure_non_negative("savings goal", value)?;
        }
        if let Some(categories) = &self.categories {
            for (key, entry) in categories.iter() {
                ensure_non_negative(&format!("{key} limit"), entry.limit)?;
            }
        }
        Ok(())
    }
}

fn ensure_non_negative(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(TrackerError::Validation(format!(
            "{field} must not be negative"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::category::CategoryKey;
    use rust_decimal_macros::dec;

    #[test]
    fn goals_split_monthly_budget_evenly() {
        let budget = Budget::from_goals(dec!(1200), dec!(300)).unwrap();
        assert_eq!(budget.weekly, dec!(300));
        assert_eq!(budget.savings_goal, dec!(300));
        for (_, entry) in budget.categories.iter() {
            assert_eq!(entry.limit, dec!(200));
            assert_eq!(entry.spent, Decimal::ZERO);
        }
    }

    #[test]
    fn goals_reject_negative_values() {
        assert!(Budget::from_goals(dec!(-1), dec!(0)).is_err());
        assert!(Budget::from_goals(dec!(100), dec!(-5)).is_err());
    }

    #[test]
    fn merge_only_touches_supplied_fields() {
        let mut budget = Budget::from_goals(dec!(600), dec!(50)).unwrap();
        budget.merge(BudgetUpdate::default().monthly(dec!(900)));
        assert_eq!(budget.monthly, dec!(900));
        assert_eq!(budget.weekly, dec!(150));
        assert_eq!(budget.categories.get(CategoryKey::Food).limit, dec!(100));
    }

    #[test]
    fn update_validation_checks_category_limits() {
        let mut categories = Categories::uniform(dec!(10));
        categories.shopping.limit = dec!(-3);
        let err = BudgetUpdate::default()
            .categories(categories)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("shopping limit"));
    }

    #[test]
    fn budget_uses_camel_case_document_shape() {
        let budget = Budget::from_goals(dec!(100), dec!(20)).unwrap();
        let value = serde_json::to_value(&budget).unwrap();
        assert!(value.get("savingsGoal").is_some());
        assert!(value.get("monthly").is_some());
        assert!(value.get("weekly").is_some());
        assert!(value["categories"].get("others").is_some());
    }
}
