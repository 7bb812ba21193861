//! Settings CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::error::ExpenseResult;
use crate::models::{CurrencyPosition, Money};
use crate::services::{AccountService, SettingsService};
use crate::storage::Storage;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,
    /// Set the currency symbol
    Currency {
        symbol: String,
        /// Put the symbol after the amount
        #[arg(long)]
        suffix: bool,
    },
    /// Set the date format (strftime, e.g. "%d/%m/%Y")
    DateFormat { format: String },
    /// Set the first day of the week (0 = Sunday, 1 = Monday)
    FirstDay { day: u8 },
    /// Set the account used when `transaction add` gets no --account
    DefaultAccount {
        /// Account name or ID
        #[arg(required_unless_present = "clear")]
        account: Option<String>,
        /// Clear the default account
        #[arg(long, conflicts_with = "account")]
        clear: bool,
    },
}

/// Handle a settings command
pub fn handle_settings_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: SettingsCommands,
) -> ExpenseResult<()> {
    match cmd {
        SettingsCommands::Show => {}
        SettingsCommands::Currency { symbol, suffix } => {
            let position = if suffix {
                CurrencyPosition::Suffix
            } else {
                CurrencyPosition::Prefix
            };
            SettingsService::new(storage, settings).set_currency(&symbol, position)?;
        }
        SettingsCommands::DateFormat { format } => {
            SettingsService::new(storage, settings).set_date_format(&format)?;
        }
        SettingsCommands::FirstDay { day } => {
            SettingsService::new(storage, settings).set_first_day_of_week(day)?;
        }
        SettingsCommands::DefaultAccount { account, clear } => {
            let id = match (account, clear) {
                (_, true) | (None, _) => None,
                (Some(name), false) => Some(AccountService::new(storage).resolve(&name)?.id),
            };
            SettingsService::new(storage, settings).set_default_account(id)?;
        }
    }

    print!("{}", describe_settings(storage, settings)?);
    Ok(())
}

pub fn describe_settings(storage: &Storage, settings: &Settings) -> ExpenseResult<String> {
    let default_account = match settings.default_account {
        Some(id) => storage
            .accounts
            .get(id)?
            .map(|a| a.name)
            .unwrap_or_else(|| "(missing)".to_string()),
        None => "(none)".to_string(),
    };
    let weekday = match settings.first_day_of_week {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        _ => "Saturday",
    };

    let mut output = String::new();
    output.push_str(&format!(
        "Currency:        {} (sample {})\n",
        settings.currency.symbol,
        Money::from_cents(123456).format_with(&settings.currency)
    ));
    output.push_str(&format!("Date format:     {}\n", settings.date_format));
    output.push_str(&format!("First weekday:   {}\n", weekday));
    output.push_str(&format!("Default account: {}\n", default_account));
    output.push_str(&format!(
        "Reminder:        {} at {}\n",
        if settings.reminder.enabled { "on" } else { "off" },
        settings.reminder.time.format("%H:%M")
    ));
    Ok(output)
}
