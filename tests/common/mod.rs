#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use finance_tracker::{
    core::{FixedClock, LoadReport, Tracker},
    storage::{JsonFileStore, MemoryStore},
};
use tempfile::TempDir;

/// Sunday 11 May 2025, mid-morning UTC.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 11, 10, 0, 0).unwrap()
}

/// Tracker over an in-memory store, pinned to [`fixed_now`].
pub fn memory_tracker() -> (Tracker, MemoryStore) {
    let store = MemoryStore::new();
    let tracker = Tracker::new(Box::new(store.clone())).with_clock(FixedClock(fixed_now()));
    (tracker, store)
}

/// Opens a file-backed tracker rooted in `dir`.
pub fn open_file_tracker(dir: &TempDir) -> (Tracker, LoadReport) {
    let store = JsonFileStore::new(dir.path().join("data")).expect("create json store");
    let (tracker, report) = Tracker::open(Box::new(store));
    (tracker.with_clock(FixedClock(fixed_now())), report)
}
