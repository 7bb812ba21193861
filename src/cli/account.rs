//! Account CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::account::{format_account_details, format_account_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{AccountType, Money};
use crate::services::{AccountService, AccountUpdate, NewAccount, SettingsService};
use crate::storage::Storage;

use super::{parse_money, require_confirmation};

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Account type (bank, cash, credit)
        #[arg(short = 't', long = "type", default_value = "bank")]
        account_type: String,
        /// Opening balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
        /// Credit limit, credit accounts only
        #[arg(short, long)]
        limit: Option<String>,
        /// Display color, #RRGGBB
        #[arg(long)]
        color: Option<String>,
        /// Icon name
        #[arg(long)]
        icon: Option<String>,
    },
    /// List all accounts
    List,
    /// Show account details
    Show {
        /// Account name or ID
        account: String,
    },
    /// Edit an account
    Edit {
        /// Account name or ID
        account: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short = 't', long = "type")]
        account_type: Option<String>,
        #[arg(short, long)]
        limit: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        /// Position in account lists
        #[arg(long)]
        sequence: Option<i32>,
    },
    /// Delete an account and all of its transactions
    Delete {
        /// Account name or ID
        account: String,
        /// Skip the confirmation requirement
        #[arg(short, long)]
        yes: bool,
    },
}

fn parse_account_type(value: &str) -> ExpenseResult<AccountType> {
    AccountType::parse(value).ok_or_else(|| {
        ExpenseError::Validation(format!(
            "Invalid account type: '{}'. Valid types: bank, cash, credit",
            value
        ))
    })
}

/// Handle an account command
pub fn handle_account_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: AccountCommands,
) -> ExpenseResult<()> {
    let service = AccountService::new(storage);

    match cmd {
        AccountCommands::Create {
            name,
            account_type,
            balance,
            limit,
            color,
            icon,
        } => {
            let mut input = NewAccount::new(name, parse_account_type(&account_type)?);
            input.opening_balance = parse_money(&balance)?;
            if let Some(limit) = limit {
                input.credit_limit = parse_money(&limit)?;
            }
            input.color = color;
            input.icon = icon;

            let account = service.create(input)?;

            println!("Created account: {}", account.name);
            println!("  Type:    {}", account.account_type);
            println!("  Balance: {}", account.balance.format_with(&settings.currency));
            if account.account_type.is_credit() {
                println!("  Limit:   {}", account.credit_limit.format_with(&settings.currency));
            }
            println!("  ID:      {}", account.id);
        }

        AccountCommands::List => {
            let accounts = service.list()?;
            print!("{}", format_account_list(&accounts, &settings.currency));
        }

        AccountCommands::Show { account } => {
            let found = service.resolve(&account)?;
            let count = storage.transactions.count_by_account(found.id)?;
            print!("{}", format_account_details(&found, count, &settings.currency));
        }

        AccountCommands::Edit {
            account,
            name,
            account_type,
            limit,
            color,
            icon,
            sequence,
        } => {
            let found = service.resolve(&account)?;

            let changes = AccountUpdate {
                name,
                account_type: account_type.as_deref().map(parse_account_type).transpose()?,
                credit_limit: limit.as_deref().map(parse_money).transpose()?,
                color,
                icon,
                sequence,
            };

            if changes.name.is_none()
                && changes.account_type.is_none()
                && changes.credit_limit.is_none()
                && changes.color.is_none()
                && changes.icon.is_none()
                && changes.sequence.is_none()
            {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(found.id, changes)?;
            println!("Updated account: {}", updated.name);
        }

        AccountCommands::Delete { account, yes } => {
            let found = service.resolve(&account)?;
            require_confirmation(yes, &format!("delete account '{}'", found.name))?;

            let deleted = service.delete(found.id)?;
            SettingsService::new(storage, settings).forget_account(found.id)?;

            println!(
                "Deleted account: {} ({} transaction(s) removed)",
                deleted.account.name, deleted.transactions_removed
            );
            let remaining: Money = service.total_balance()?;
            println!("Total balance: {}", remaining.format_with(&settings.currency));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_account_type() {
        assert_eq!(parse_account_type("Credit").unwrap(), AccountType::Credit);
        assert!(parse_account_type("stocks").unwrap_err().is_validation());
    }
}
