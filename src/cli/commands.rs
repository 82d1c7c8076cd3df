use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    config::{Config, ConfigManager},
    core::{Outcome, Tracker},
    currency::{format_amount, CurrencyCode},
    errors::CliError,
    ledger::{calculate_total, DateWindow, Expense, NewExpense},
    storage::JsonFileStore,
    utils::paths::{app_data_dir, data_dir_in},
};

use super::output;

const USAGE: &str = "\
usage: finance_tracker_cli <command> [args]

commands:
  goals <monthly> <savings>        set the monthly budget and savings goal
  add <amount> <category> [note]   record an expense
  delete <id>                      remove an expense
  list [start end]                 list expenses, optionally within dates
  insights                         show spending insights
  summary                          month-to-date overview by category
  help                             show this message";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Goals {
        monthly: Decimal,
        savings_goal: Decimal,
    },
    Add {
        amount: String,
        category: String,
        note: Option<String>,
    },
    Delete {
        id: Uuid,
    },
    List {
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    },
    Insights,
    Summary,
    Help,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(Command::Help);
        };
        match (name.as_str(), rest) {
            ("goals", [monthly, savings]) => Ok(Command::Goals {
                monthly: parse_budget_figure(monthly)?,
                savings_goal: parse_budget_figure(savings)?,
            }),
            ("add", [amount, category, note @ ..]) => Ok(Command::Add {
                amount: amount.clone(),
                category: category.clone(),
                note: (!note.is_empty()).then(|| note.join(" ")),
            }),
            ("delete", [id]) => Uuid::parse_str(id)
                .map(|id| Command::Delete { id })
                .map_err(|_| CliError::Input(format!("`{id}` is not an expense id"))),
            ("list", []) => Ok(Command::List { range: None }),
            ("list", [start, end]) => Ok(Command::List {
                range: Some((parse_bound(start, Bound::Start)?, parse_bound(end, Bound::End)?)),
            }),
            ("insights", []) => Ok(Command::Insights),
            ("summary", []) => Ok(Command::Summary),
            ("help" | "--help" | "-h", _) => Ok(Command::Help),
            (other, _) => Err(CliError::Input(format!(
                "unrecognized command line `{other} {}`; run `help` for usage",
                rest.join(" ")
            ))),
        }
    }
}

/// Entry point for the binary: parses process arguments and runs against
/// the application data directory.
pub fn run_cli() -> Result<(), CliError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    run_with_args(&args, &app_data_dir())
}

pub fn run_with_args(args: &[String], base: &Path) -> Result<(), CliError> {
    let command = Command::parse(args)?;
    if command == Command::Help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = ConfigManager::with_base_dir(base).load()?;
    let store = JsonFileStore::new(data_dir_in(base))?;
    let (tracker, report) = Tracker::open(Box::new(store));
    let mut tracker = tracker.with_rules(config.insights);
    for warning in &report.warnings {
        output::warning(warning);
    }

    execute(&mut tracker, &config, command)
}

fn execute(tracker: &mut Tracker, config: &Config, command: Command) -> Result<(), CliError> {
    let currency = CurrencyCode::new(&config.currency);
    match command {
        Command::Goals {
            monthly,
            savings_goal,
        } => {
            let outcome = tracker.set_goals(monthly, savings_goal)?;
            report_save(&outcome);
            output::success(format!(
                "Budget goals saved: {} per month, {} per category",
                format_amount(monthly, &currency),
                format_amount(tracker.ledger().budget().categories.food.limit, &currency)
            ));
        }
        Command::Add {
            amount,
            category,
            note,
        } => {
            let mut input = NewExpense::new(amount, category);
            input.note = note;
            let outcome = tracker.add_expense(input)?;
            report_save(&outcome);
            let expense = outcome.into_inner();
            output::success(format!(
                "Added expense {} ({} {})",
                expense.id,
                format_amount(expense.amount, &currency),
                expense.category
            ));
        }
        Command::Delete { id } => {
            let outcome = tracker.delete_expense(id);
            report_save(&outcome);
            match outcome.into_inner() {
                Some(removed) => output::success(format!("Deleted expense {}", removed.id)),
                None => output::info(format!("No expense with id {id}; nothing deleted")),
            }
        }
        Command::List { range } => {
            let expenses: Vec<&Expense> = match range {
                Some((start, end)) => {
                    let window = DateWindow::new(start, end)?;
                    tracker.expenses_between(window.start, window.end)
                }
                None => tracker.ledger().expenses().iter().collect(),
            };
            output::section("Expenses");
            if expenses.is_empty() {
                output::info("No expenses recorded.");
            }
            for expense in &expenses {
                println!("{}", expense_line(expense, &currency));
            }
            match calculate_total(expenses.iter().copied()) {
                Some(total) => output::info(format!("Total: {}", format_amount(total, &currency))),
                None => output::warning("Total exceeds the largest representable amount"),
            }
        }
        Command::Insights => {
            output::section("Insights");
            for insight in tracker.insights() {
                output::info(insight);
            }
        }
        Command::Summary => {
            let overview = tracker.overview(config.recent_limit);
            output::section("This month");
            output::info(format!(
                "Spent {} of {}; {} remaining, {} per day for {} days",
                format_amount(overview.monthly_spent, &currency),
                format_amount(overview.monthly_budget, &currency),
                format_amount(overview.monthly_remaining, &currency),
                format_amount(overview.daily_allowance, &currency),
                overview.days_left
            ));
            output::info(format!(
                "This week: {}",
                format_amount(overview.weekly_spent, &currency)
            ));
            output::section("Categories");
            for row in tracker.category_breakdown() {
                let used = row
                    .utilization
                    .map(|pct| format!("{:.1}%", pct.round_dp(1)))
                    .unwrap_or_else(|| "no limit".into());
                println!(
                    "{:<15} {:>14} / {:<14} {}",
                    row.category.label(),
                    format_amount(row.spent, &currency),
                    format_amount(row.limit, &currency),
                    used
                );
            }
            if !overview.recent.is_empty() {
                output::section("Recent");
                for expense in &overview.recent {
                    println!("{}", expense_line(expense, &currency));
                }
            }
        }
        Command::Help => println!("{USAGE}"),
    }
    Ok(())
}

fn expense_line(expense: &Expense, currency: &CurrencyCode) -> String {
    let mut line = format!(
        "{}  {}  {:<14} {:>12}",
        expense.id,
        expense.date.format("%Y-%m-%d %H:%M"),
        expense.category.label(),
        format_amount(expense.amount, currency)
    );
    if let Some(note) = &expense.note {
        line.push_str("  ");
        line.push_str(note);
    }
    line
}

fn report_save<T>(outcome: &Outcome<T>) {
    if let Some(err) = &outcome.save_error {
        output::warning(format!("Change applied but not saved: {err}"));
    }
}

/// Budget figures may be zero, unlike expense amounts.
fn parse_budget_figure(raw: &str) -> Result<Decimal, CliError> {
    let value: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| CliError::Input(format!("`{raw}` is not a number")))?;
    if value < Decimal::ZERO {
        return Err(CliError::Input(format!("`{raw}` must not be negative")));
    }
    Ok(value)
}

#[derive(Clone, Copy)]
enum Bound {
    Start,
    End,
}

/// Accepts RFC 3339 instants or `YYYY-MM-DD`, which expands to the start or
/// end of that UTC day.
fn parse_bound(raw: &str, bound: Bound) -> Result<DateTime<Utc>, CliError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| CliError::Input(format!("`{raw}` is not a date (YYYY-MM-DD)")))?;
    let day = DateWindow::day(date);
    Ok(match bound {
        Bound::Start => day.start,
        Bound::End => day.end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_add_with_multi_word_note() {
        let command = Command::parse(&args(&["add", "12.5", "Food", "team", "lunch"])).unwrap();
        assert_eq!(
            command,
            Command::Add {
                amount: "12.5".into(),
                category: "Food".into(),
                note: Some("team lunch".into()),
            }
        );
    }

    #[test]
    fn parses_goals_and_allows_zero_savings() {
        let command = Command::parse(&args(&["goals", "1000", "0"])).unwrap();
        assert_eq!(
            command,
            Command::Goals {
                monthly: dec!(1000),
                savings_goal: Decimal::ZERO,
            }
        );
    }

    #[test]
    fn list_dates_expand_to_whole_days() {
        let command = Command::parse(&args(&["list", "2025-05-01", "2025-05-31"])).unwrap();
        match command {
            Command::List {
                range: Some((start, end)),
            } => {
                assert_eq!(start, Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap());
                assert!(end > Utc.with_ymd_and_hms(2025, 5, 31, 23, 59, 59).unwrap());
            }
            other => panic!("expected a ranged list, got {other:?}"),
        }
    }

    #[test]
    fn empty_arguments_show_help() {
        assert_eq!(Command::parse(&[]).unwrap(), Command::Help);
    }

    #[test]
    fn rejects_unknown_commands_and_bad_ids() {
        assert!(matches!(
            Command::parse(&args(&["launch"])),
            Err(CliError::Input(_))
        ));
        assert!(matches!(
            Command::parse(&args(&["delete", "not-a-uuid"])),
            Err(CliError::Input(_))
        ));
    }
}
