use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::TrackerError;

/// The closed set of spending categories every budget carries.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Food,
    Transportation,
    Entertainment,
    Shopping,
    Utilities,
    Others,
}

impl CategoryKey {
    /// Declaration order, which is also the reporting order.
    pub const ALL: [CategoryKey; 6] = [
        CategoryKey::Food,
        CategoryKey::Transportation,
        CategoryKey::Entertainment,
        CategoryKey::Shopping,
        CategoryKey::Utilities,
        CategoryKey::Others,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKey::Food => "food",
            CategoryKey::Transportation => "transportation",
            CategoryKey::Entertainment => "entertainment",
            CategoryKey::Shopping => "shopping",
            CategoryKey::Utilities => "utilities",
            CategoryKey::Others => "others",
        }
    }

    /// Title-cased label used by presentation layers.
    pub fn label(self) -> &'static str {
        match self {
            CategoryKey::Food => "Food",
            CategoryKey::Transportation => "Transportation",
            CategoryKey::Entertainment => "Entertainment",
            CategoryKey::Shopping => "Shopping",
            CategoryKey::Utilities => "Utilities",
            CategoryKey::Others => "Others",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKey {
    type Err = TrackerError;

    /// Matches case-insensitively, ignoring surrounding whitespace.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TrackerError::Validation("category is required".into()));
        }
        let lowered = trimmed.to_lowercase();
        CategoryKey::ALL
            .into_iter()
            .find(|key| key.as_str() == lowered)
            .ok_or_else(|| TrackerError::UnknownCategory(trimmed.to_string()))
    }
}

impl<'de> Deserialize<'de> for CategoryKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Ceiling and running total for one category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryBudget {
    #[serde(default)]
    pub limit: Decimal,
    #[serde(default)]
    pub spent: Decimal,
}

impl CategoryBudget {
    pub fn with_limit(limit: Decimal) -> Self {
        Self {
            limit,
            spent: Decimal::ZERO,
        }
    }

    pub fn remaining(&self) -> Decimal {
        self.limit - self.spent
    }
}

/// Per-category budgets keyed by the six fixed categories.
///
/// Serializes as a JSON object with one entry per category key; keys missing
/// from a persisted document load as zeroed entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Categories {
    #[serde(default)]
    pub food: CategoryBudget,
    #[serde(default)]
    pub transportation: CategoryBudget,
    #[serde(default)]
    pub entertainment: CategoryBudget,
    #[serde(default)]
    pub shopping: CategoryBudget,
    #[serde(default)]
    pub utilities: CategoryBudget,
    #[serde(default)]
    pub others: CategoryBudget,
}

impl Categories {
    /// Every category gets the same limit and a zero running total.
    pub fn uniform(limit: Decimal) -> Self {
        let entry = CategoryBudget::with_limit(limit);
        Self {
            food: entry,
            transportation: entry,
            entertainment: entry,
            shopping: entry,
            utilities: entry,
            others: entry,
        }
    }

    pub fn get(&self, key: CategoryKey) -> &CategoryBudget {
        match key {
            CategoryKey::Food => &self.food,
            CategoryKey::Transportation => &self.transportation,
            CategoryKey::Entertainment => &self.entertainment,
            CategoryKey::Shopping => &self.shopping,
            CategoryKey::Utilities => &self.utilities,
            CategoryKey::Others => &self.others,
        }
    }

    pub fn get_mut(&mut self, key: CategoryKey) -> &mut CategoryBudget {
        match key {
            CategoryKey::Food => &mut self.food,
            CategoryKey::Transportation => &mut self.transportation,
            CategoryKey::Entertainment => &mut self.entertainment,
            CategoryKey::Shopping => &mut self.shopping,
            CategoryKey::Utilities => &mut self.utilities,
            CategoryKey::Others => &mut self.others,
        }
    }

    /// Iterates in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryKey, &CategoryBudget)> + '_ {
        CategoryKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}
