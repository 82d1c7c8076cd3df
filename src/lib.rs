#![doc(test(attr(deny(warnings))))]

//! Finance Tracker keeps a monthly budget and an expense ledger, and derives
//! rule-based spending insights from them.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod insights;
pub mod ledger;
pub mod profile;
pub mod storage;
pub mod utils;

pub use crate::core::{Outcome, Tracker};
pub use errors::{Result, TrackerError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance tracker tracing initialized.");
    });
}
