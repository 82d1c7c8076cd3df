use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{
    summary::{category_breakdown, CategorySummary, SpendingOverview},
    time::{Clock, SystemClock},
};
use crate::{
    errors::{Result, TrackerError},
    insights::{derive_insights, render, Insight, InsightRules},
    ledger::{Budget, BudgetUpdate, Expense, Ledger, NewExpense},
    storage::{KeyValueStore, BUDGET_KEY, EXPENSES_KEY},
};

/// Outcome of reading persisted state into the tracker.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Repairs applied while reconciling the persisted documents.
    pub warnings: Vec<String>,
    /// Set when the documents could not be read; the ledger was reset to
    /// its empty default and remains usable in memory.
    pub error: Option<TrackerError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.error.is_none()
    }
}

/// A mutation's result together with the fate of the follow-up save.
///
/// The in-memory change stands even when `save_error` is set.
#[derive(Debug)]
#[must_use]
pub struct Outcome<T> {
    pub value: T,
    pub save_error: Option<TrackerError>,
}

impl<T> Outcome<T> {
    pub fn is_durable(&self) -> bool {
        self.save_error.is_none()
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Facade that owns the ledger and routes every mutation through
/// validation, persistence, and logging.
///
/// Not synchronized: callers must not mutate one tracker concurrently.
pub struct Tracker {
    ledger: Ledger,
    storage: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    rules: InsightRules,
}

impl Tracker {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self {
            ledger: Ledger::new(),
            storage,
            clock: Box::new(SystemClock),
            rules: InsightRules::default(),
        }
    }

    /// Creates a tracker and immediately loads persisted state.
    pub fn open(storage: Box<dyn KeyValueStore>) -> (Self, LoadReport) {
        let mut tracker = Self::new(storage);
        let report = tracker.load();
        (tracker, report)
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_rules(mut self, rules: InsightRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn rules(&self) -> &InsightRules {
        &self.rules
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Replaces in-memory state with the persisted budget and expenses.
    pub fn load(&mut self) -> LoadReport {
        match self.read_documents() {
            Ok((budget, expenses)) => {
                let (ledger, warnings) = Ledger::from_parts(budget, expenses);
                for warning in &warnings {
                    tracing::warn!(%warning, "reconciled persisted ledger");
                }
                tracing::info!(expenses = ledger.expense_count(), "ledger loaded");
                self.ledger = ledger;
                LoadReport {
                    warnings,
                    error: None,
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load ledger; starting empty");
                self.ledger = Ledger::new();
                LoadReport {
                    warnings: vec![format!("persisted ledger could not be loaded: {err}")],
                    error: Some(err),
                }
            }
        }
    }

    /// Writes the full budget and expense list back to storage.
    pub fn save(&self) -> Result<()> {
        let budget = serde_json::to_string(self.ledger.budget())?;
        let expenses = serde_json::to_string(self.ledger.expenses())?;
        self.storage.set(BUDGET_KEY, &budget)?;
        self.storage.set(EXPENSES_KEY, &expenses)?;
        Ok(())
    }

    pub fn add_expense(&mut self, input: NewExpense) -> Result<Outcome<Expense>> {
        let now = self.clock.now();
        let expense = self.ledger.add_expense(input, now).map_err(|err| {
            tracing::info!(error = %err, "expense rejected");
            err
        })?;
        tracing::info!(
            id = %expense.id,
            category = %expense.category,
            amount = %expense.amount,
            "expense added"
        );
        Ok(self.persist(expense))
    }

    /// Deletes by id. Unknown ids are a no-op and trigger no save.
    pub fn delete_expense(&mut self, id: Uuid) -> Outcome<Option<Expense>> {
        match self.ledger.delete_expense(id) {
            Some(removed) => {
                tracing::info!(%id, category = %removed.category, "expense deleted");
                self.persist(Some(removed))
            }
            None => {
                tracing::debug!(%id, "delete ignored; no such expense");
                Outcome {
                    value: None,
                    save_error: None,
                }
            }
        }
    }

    pub fn update_budget(&mut self, update: BudgetUpdate) -> Result<Outcome<()>> {
        self.ledger.update_budget(update)?;
        tracing::info!(monthly = %self.ledger.budget().monthly, "budget updated");
        Ok(self.persist(()))
    }

    /// Applies onboarding goals: weekly and per-category limits derive from
    /// the monthly figure.
    pub fn set_goals(&mut self, monthly: Decimal, savings_goal: Decimal) -> Result<Outcome<()>> {
        self.ledger.set_goals(monthly, savings_goal)?;
        tracing::info!(%monthly, %savings_goal, "budget goals set");
        Ok(self.persist(()))
    }

    pub fn expenses_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<&Expense> {
        let found = self.ledger.expenses_between(start, end);
        tracing::debug!(%start, %end, matched = found.len(), "range query");
        found
    }

    pub fn calculate_total(&self) -> Decimal {
        self.ledger.calculate_total()
    }

    pub fn derive_insights(&self) -> Vec<Insight> {
        derive_insights(
            self.ledger.budget(),
            self.ledger.expenses(),
            self.clock.now(),
            &self.rules,
        )
    }

    /// Advisory messages for the current snapshot.
    pub fn insights(&self) -> Vec<String> {
        render(&self.derive_insights())
    }

    pub fn overview(&self, recent_limit: usize) -> SpendingOverview {
        SpendingOverview::compute(&self.ledger, self.clock.now(), recent_limit)
    }

    pub fn category_breakdown(&self) -> Vec<CategorySummary> {
        category_breakdown(&self.ledger)
    }

    fn read_documents(&self) -> Result<(Budget, Vec<Expense>)> {
        let budget = match self.storage.get(BUDGET_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Budget::default(),
        };
        let expenses = match self.storage.get(EXPENSES_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        Ok((budget, expenses))
    }

    fn persist<T>(&self, value: T) -> Outcome<T> {
        let save_error = self.save().err();
        if let Some(err) = &save_error {
            tracing::warn!(error = %err, "change kept in memory but not saved");
        }
        Outcome { value, save_error }
    }
}
