//! Reminder CLI commands
//!
//! The reminder is not scheduled with the OS; `reminder check` is meant to be
//! run from a shell profile or cron and prints a nudge when one is due.

use chrono::{Local, NaiveTime};
use clap::Subcommand;

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::services::{ReminderService, SettingsService};
use crate::storage::Storage;

/// Reminder subcommands
#[derive(Subcommand)]
pub enum ReminderCommands {
    /// Show whether the reminder is on and when it fires next
    Status,
    /// Turn the reminder on
    On {
        /// Time of day, HH:MM
        #[arg(short, long)]
        time: Option<String>,
    },
    /// Turn the reminder off
    Off,
    /// Print a reminder if one is due now
    Check,
}

fn parse_time(value: &str) -> ExpenseResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
        ExpenseError::Validation(format!("Invalid time '{}'. Use HH:MM, e.g. 20:30", value))
    })
}

/// Handle a reminder command
pub fn handle_reminder_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: ReminderCommands,
) -> ExpenseResult<()> {
    let now = Local::now().naive_local();

    match cmd {
        ReminderCommands::Status => {}
        ReminderCommands::On { time } => {
            let time = time.as_deref().map(parse_time).transpose()?;
            SettingsService::new(storage, settings).set_reminder(true, time)?;
        }
        ReminderCommands::Off => {
            SettingsService::new(storage, settings).set_reminder(false, None)?;
        }
        ReminderCommands::Check => {
            if ReminderService::new(storage, settings).should_notify(now)? {
                println!("Reminder: you haven't recorded any transactions today.");
            }
            return Ok(());
        }
    }

    match ReminderService::new(storage, settings).next_reminder(now) {
        Some(next) => println!(
            "Reminder on at {}; next at {}",
            settings.reminder.time.format("%H:%M"),
            next.format("%Y-%m-%d %H:%M")
        ),
        None => println!("Reminder off"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("20:30").unwrap(), NaiveTime::from_hms_opt(20, 30, 0).unwrap());
        assert!(parse_time("8pm").unwrap_err().is_validation());
    }
}
