mod common;

use std::fs;

use chrono::Duration;
use common::{fixed_now, open_file_tracker};
use finance_tracker::{errors::TrackerError, ledger::NewExpense};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::tempdir;

#[test]
fn ledger_survives_reopen() {
    let temp = tempdir().unwrap();
    let added = {
        let (mut tracker, report) = open_file_tracker(&temp);
        assert!(report.is_clean());
        tracker.set_goals(dec!(600), dec!(50)).unwrap().into_inner();
        tracker
            .add_expense(NewExpense::new("12.5", "food").with_note("lunch"))
            .unwrap()
            .into_inner();
        tracker
            .add_expense(NewExpense::new("30", "utilities").on(fixed_now() - Duration::days(1)))
            .unwrap()
            .into_inner()
    };

    let (tracker, report) = open_file_tracker(&temp);
    assert!(report.is_clean(), "{:?}", report.warnings);
    let ledger = tracker.ledger();
    assert_eq!(ledger.expense_count(), 2);
    assert_eq!(ledger.budget().monthly, dec!(600));
    assert_eq!(ledger.budget().weekly, dec!(150));
    assert_eq!(ledger.budget().categories.food.limit, dec!(100));
    assert_eq!(ledger.budget().categories.food.spent, dec!(12.5));
    assert_eq!(ledger.expenses()[0].note.as_deref(), Some("lunch"));
    assert_eq!(ledger.expense(added.id), Some(&added));
}

#[test]
fn documents_are_plain_json_under_data_dir() {
    let temp = tempdir().unwrap();
    let (mut tracker, _) = open_file_tracker(&temp);
    tracker.set_goals(dec!(1200), dec!(0)).unwrap().into_inner();
    tracker
        .add_expense(NewExpense::new("8", "transportation"))
        .unwrap()
        .into_inner();

    let budget: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("data/budget.json")).unwrap())
            .unwrap();
    assert_eq!(budget["monthly"].to_string(), "1200");
    assert!(budget.get("savingsGoal").is_some());
    assert_eq!(
        budget["categories"]["transportation"]["spent"].to_string(),
        "8"
    );

    let expenses: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("data/expenses.json")).unwrap())
            .unwrap();
    assert_eq!(expenses[0]["category"], "transportation");
}

#[test]
fn corrupt_document_falls_back_to_empty_ledger() {
    let temp = tempdir().unwrap();
    {
        let (mut tracker, _) = open_file_tracker(&temp);
        tracker
            .add_expense(NewExpense::new("5", "others"))
            .unwrap()
            .into_inner();
    }
    fs::write(temp.path().join("data/expenses.json"), "[{\"broken\"").unwrap();

    let (mut tracker, report) = open_file_tracker(&temp);
    assert!(matches!(report.error, Some(TrackerError::Persistence(_))));
    assert_eq!(tracker.ledger().expense_count(), 0);

    // The tracker stays usable and the next save repairs the file.
    tracker
        .add_expense(NewExpense::new("7", "food"))
        .unwrap()
        .into_inner();
    let (reopened, report) = open_file_tracker(&temp);
    assert!(report.is_clean());
    assert_eq!(reopened.ledger().expense_count(), 1);
}

#[test]
fn drifted_totals_are_reconciled_on_load() {
    let temp = tempdir().unwrap();
    let data = temp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("budget.json"),
        r#"{"monthly":1000,"weekly":250,"savingsGoal":0,
            "categories":{"food":{"limit":100,"spent":999}}}"#,
    )
    .unwrap();
    fs::write(
        data.join("expenses.json"),
        r#"[
            {"id":"6f1c9a4e-7d0b-4a57-9a55-3d2f4f0d1e01","date":"2025-05-01T08:00:00Z",
             "amount":4,"category":"food"},
            {"id":"6f1c9a4e-7d0b-4a57-9a55-3d2f4f0d1e02","date":"2025-05-09T08:00:00Z",
             "amount":6,"category":"food"}
        ]"#,
    )
    .unwrap();

    let (tracker, report) = open_file_tracker(&temp);
    assert!(report.error.is_none());
    assert_eq!(report.warnings.len(), 2, "{:?}", report.warnings);
    let ledger = tracker.ledger();
    assert_eq!(ledger.budget().categories.food.spent, dec!(10));
    assert_eq!(ledger.budget().categories.food.limit, dec!(100));
    assert!(ledger.expenses()[0].date > ledger.expenses()[1].date);
}

#[test]
fn missing_documents_start_with_defaults() {
    let temp = tempdir().unwrap();
    let (tracker, report) = open_file_tracker(&temp);
    assert!(report.is_clean());
    assert_eq!(tracker.ledger().budget().monthly, dec!(0));
    assert_eq!(tracker.ledger().expense_count(), 0);
}

#[test]
fn amounts_reload_digit_for_digit() {
    let temp = tempdir().unwrap();
    let (high_precision, largest) = {
        let (mut tracker, _) = open_file_tracker(&temp);
        tracker.set_goals(dec!(1000), dec!(0)).unwrap().into_inner();
        let high_precision = tracker
            .add_expense(NewExpense::new("0.1234567890123456789", "food"))
            .unwrap()
            .into_inner();
        let largest = tracker
            .add_expense(NewExpense::new(Decimal::MAX - dec!(1), "others"))
            .unwrap()
            .into_inner();
        (high_precision, largest)
    };

    let (tracker, report) = open_file_tracker(&temp);
    assert!(report.is_clean(), "{:?}", report);
    let ledger = tracker.ledger();
    assert_eq!(ledger.expense(high_precision.id), Some(&high_precision));
    assert_eq!(
        ledger.expense(largest.id).map(|expense| expense.amount),
        Some(Decimal::MAX - dec!(1))
    );
    assert_eq!(
        ledger.budget().categories.food.spent.to_string(),
        "0.1234567890123456789"
    );
    assert_eq!(
        ledger.budget().categories.food.limit,
        dec!(1000) / Decimal::from(6)
    );
}

#[test]
fn rejected_overflow_leaves_saved_ledger_intact() {
    let temp = tempdir().unwrap();
    {
        let (mut tracker, _) = open_file_tracker(&temp);
        tracker
            .add_expense(NewExpense::new(Decimal::MAX, "food"))
            .unwrap()
            .into_inner();
        let err = tracker
            .add_expense(NewExpense::new("1", "food"))
            .unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
        assert!(!tracker.insights().is_empty());
    }

    let (tracker, report) = open_file_tracker(&temp);
    assert!(report.is_clean(), "{:?}", report);
    assert_eq!(tracker.ledger().expense_count(), 1);
    assert_eq!(tracker.ledger().budget().categories.food.spent, Decimal::MAX);
}
