//! Ledger facade wiring the domain model to storage, the clock, and the
//! insight engine.

pub mod summary;
pub mod time;
pub mod tracker;

pub use summary::{category_breakdown, CategorySummary, SpendingOverview};
pub use time::{Clock, FixedClock, SystemClock};
pub use tracker::{LoadReport, Outcome, Tracker};
