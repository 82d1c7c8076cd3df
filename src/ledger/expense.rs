use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::CategoryKey;
use crate::errors::{Result, TrackerError};

/// A recorded expense. Immutable once created; only deletion removes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Expense {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub amount: Decimal,
    pub category: CategoryKey,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Caller-supplied fields for a new expense, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewExpense {
    pub amount: String,
    pub category: String,
    pub note: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl NewExpense {
    pub fn new(amount: impl ToString, category: impl Into<String>) -> Self {
        Self {
            amount: amount.to_string(),
            category: category.into(),
            ..Self::default()
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn on(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Validates the input and assigns a fresh id, defaulting the date to `now`.
    pub fn into_expense(self, now: DateTime<Utc>) -> Result<Expense> {
        let amount = parse_amount(&self.amount)?;
        let category = CategoryKey::from_str(&self.category)?;
        Ok(Expense {
            id: Uuid::new_v4(),
            date: self.date.unwrap_or(now),
            amount,
            category,
            note: non_empty(self.note),
            description: non_empty(self.description),
        })
    }
}

/// Parses a strictly positive decimal amount.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::Validation("amount is required".into()));
    }
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| TrackerError::Validation(format!("amount `{trimmed}` is not a number")))?;
    if amount <= Decimal::ZERO {
        return Err(TrackerError::Validation(format!(
            "amount must be positive, got {trimmed}"
        )));
    }
    Ok(amount)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
