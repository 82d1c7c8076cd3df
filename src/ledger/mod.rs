//! Ledger domain models, persistence-friendly types, and helpers.

pub mod budget;
pub mod category;
pub mod expense;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod time_window;

pub use budget::{Budget, BudgetUpdate};
pub use category::{Categories, CategoryBudget, CategoryKey};
pub use expense::{parse_amount, Expense, NewExpense};
pub use ledger::{calculate_total, Ledger};
pub use time_window::DateWindow;
