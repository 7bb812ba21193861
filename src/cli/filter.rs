//! Filter CLI commands
//!
//! Changes the saved transaction filter used by `transaction list`, reports
//! and the TUI.

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{DateRangeType, TransactionType};
use crate::services::{AccountService, CategoryService, FilterService, SettingsService};
use crate::storage::Storage;

use super::parse_date;

/// Filter subcommands
#[derive(Subcommand)]
pub enum FilterCommands {
    /// Show the saved filter
    Show,
    /// Select the date range
    Range {
        #[arg(value_enum)]
        range: DateRangeType,
        /// Start of a custom range (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// End of a custom range (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<String>,
    },
    /// Select accounts; no names selects all accounts
    Accounts {
        /// Account names or IDs
        accounts: Vec<String>,
    },
    /// Select categories; no names selects all categories
    Categories {
        /// Category names or IDs
        categories: Vec<String>,
    },
    /// Select transaction types; none selects both
    Types {
        #[arg(value_enum)]
        types: Vec<TransactionType>,
    },
    /// Clear account, category and type selections
    Clear,
}

/// Handle a filter command
pub fn handle_filter_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: FilterCommands,
) -> ExpenseResult<()> {
    match cmd {
        FilterCommands::Show => {}

        FilterCommands::Range { range, from, to } => {
            let mut service = SettingsService::new(storage, settings);
            match (from, to) {
                (Some(from), Some(to)) => {
                    if range != DateRangeType::Custom {
                        return Err(ExpenseError::Validation(
                            "--from and --to only apply to the custom range".into(),
                        ));
                    }
                    service.set_custom_range(parse_date(&from)?, parse_date(&to)?)?;
                }
                _ => service.set_date_range_type(range)?,
            }
        }

        FilterCommands::Accounts { accounts } => {
            let service = AccountService::new(storage);
            let ids = accounts
                .iter()
                .map(|a| service.resolve(a).map(|a| a.id))
                .collect::<ExpenseResult<Vec<_>>>()?;
            SettingsService::new(storage, settings).set_accounts(ids)?;
        }

        FilterCommands::Categories { categories } => {
            let service = CategoryService::new(storage);
            let ids = categories
                .iter()
                .map(|c| service.resolve(c).map(|c| c.id))
                .collect::<ExpenseResult<Vec<_>>>()?;
            SettingsService::new(storage, settings).set_categories(ids)?;
        }

        FilterCommands::Types { types } => {
            SettingsService::new(storage, settings).set_transaction_types(types)?;
        }

        FilterCommands::Clear => {
            SettingsService::new(storage, settings).clear_filters()?;
        }
    }

    print!("{}", describe_filter(storage, settings)?);
    Ok(())
}

/// Human-readable summary of the saved filter
pub fn describe_filter(storage: &Storage, settings: &Settings) -> ExpenseResult<String> {
    let filter = &settings.filter;
    let service = FilterService::new(storage, settings);

    let account_names = names_or_all(
        filter
            .accounts
            .iter()
            .map(|id| storage.accounts.get(*id))
            .collect::<ExpenseResult<Vec<_>>>()?
            .into_iter()
            .flatten()
            .map(|a| a.name)
            .collect(),
    );
    let category_names = names_or_all(
        filter
            .categories
            .iter()
            .map(|id| storage.categories.get(*id))
            .collect::<ExpenseResult<Vec<_>>>()?
            .into_iter()
            .flatten()
            .map(|c| c.name)
            .collect(),
    );
    let type_names = names_or_all(filter.transaction_types.iter().map(|t| t.to_string()).collect());

    let mut output = String::new();
    output.push_str(&format!("Date range:   {} ({})\n", filter.date_range_type, service.range_label()));
    output.push_str(&format!("Accounts:     {}\n", account_names));
    output.push_str(&format!("Categories:   {}\n", category_names));
    output.push_str(&format!("Types:        {}\n", type_names));
    output.push_str(&format!(
        "Filter:       {}\n",
        if service.is_filter_enabled() { "on" } else { "off" }
    ));
    Ok(output)
}

fn names_or_all(names: Vec<String>) -> String {
    if names.is_empty() {
        "All".to_string()
    } else {
        names.join(", ")
    }
}
