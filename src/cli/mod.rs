//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod category;
pub mod export;
pub mod filter;
pub mod history;
pub mod reminder;
pub mod report;
pub mod settings;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, ExportArgs};
pub use filter::{handle_filter_command, FilterCommands};
pub use history::{handle_history_command, HistoryArgs};
pub use reminder::{handle_reminder_command, ReminderCommands};
pub use report::{handle_report_command, ReportCommands};
pub use settings::{handle_settings_command, SettingsCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{Duration, Local, NaiveDate};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Money;

pub(crate) fn parse_money(value: &str) -> ExpenseResult<Money> {
    Money::parse(value).map_err(|_| {
        ExpenseError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '12.50' or '12'",
            value
        ))
    })
}

/// Parse `YYYY-MM-DD`, `today` or `yesterday`
pub(crate) fn parse_date(value: &str) -> ExpenseResult<NaiveDate> {
    let today = Local::now().date_naive();
    parse_date_relative(value, today)
}

fn parse_date_relative(value: &str, today: NaiveDate) -> ExpenseResult<NaiveDate> {
    match value.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").map_err(|_| {
            ExpenseError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", value))
        }),
    }
}

/// Destructive commands need `--yes`
pub(crate) fn require_confirmation(confirmed: bool, action: &str) -> ExpenseResult<()> {
    if confirmed {
        Ok(())
    } else {
        Err(ExpenseError::Validation(format!(
            "Refusing to {} without --yes",
            action
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_relative() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(parse_date_relative("today", today).unwrap(), today);
        assert_eq!(
            parse_date_relative("Yesterday", today).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
        );
        assert_eq!(
            parse_date_relative("2026-01-05", today).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
        );
        assert!(parse_date_relative("05/01/2026", today).is_err());
    }

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("12.5").unwrap().cents(), 1250);
        assert!(parse_money("abc").unwrap_err().is_validation());
    }

    #[test]
    fn test_require_confirmation() {
        assert!(require_confirmation(true, "delete").is_ok());
        let err = require_confirmation(false, "delete account 'Cash'").unwrap_err();
        assert_eq!(err.user_message(), "Refusing to delete account 'Cash' without --yes");
    }
}
