//! Transaction CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_table, NameLookup};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{DateRangeType, TransactionType};
use crate::services::{
    AccountService, CategoryService, FilterService, NewTransaction, TransactionService,
    TransactionUpdate,
};
use crate::storage::Storage;

use super::{parse_date, parse_money, require_confirmation};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        /// Amount (e.g., "12.50"); the category decides income or expense
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Account name or ID; defaults to the default account
        #[arg(short, long)]
        account: Option<String>,
        /// Date (YYYY-MM-DD, "today" or "yesterday")
        #[arg(short, long, default_value = "today")]
        date: String,
        #[arg(short, long, default_value = "")]
        notes: String,
        /// Path of an attached receipt image
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// List transactions matching the saved filter
    List {
        /// Override the saved date range
        #[arg(short, long, value_enum)]
        range: Option<DateRangeType>,
        /// Override the saved account selection (repeatable)
        #[arg(short, long)]
        account: Vec<String>,
        /// Override the saved category selection (repeatable)
        #[arg(short, long)]
        category: Vec<String>,
        /// Override the saved transaction types (repeatable)
        #[arg(short = 't', long = "type", value_enum)]
        transaction_type: Vec<TransactionType>,
        /// Maximum number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (full or short form)
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID (full or short form)
        id: String,
        #[arg(long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        account: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
        #[arg(long, conflicts_with = "clear_image")]
        image: Option<PathBuf>,
        /// Remove the attached image
        #[arg(long)]
        clear_image: bool,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short form)
        id: String,
        /// Skip the confirmation requirement
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> ExpenseResult<()> {
    let service = TransactionService::new(storage);
    let accounts = AccountService::new(storage);
    let categories = CategoryService::new(storage);

    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            account,
            date,
            notes,
            image,
        } => {
            let account = match account {
                Some(name) => accounts.resolve(&name)?,
                None => settings
                    .default_account
                    .map(|id| accounts.get(id))
                    .transpose()?
                    .flatten()
                    .ok_or_else(|| {
                        ExpenseError::Validation(
                            "No account given and no default account is set. Use --account."
                                .into(),
                        )
                    })?,
            };
            let category = categories.resolve(&category)?;

            let txn = service.create(NewTransaction {
                account_id: account.id,
                category_id: category.id,
                amount: parse_money(&amount)?,
                date: parse_date(&date)?,
                notes,
                image_path: image.map(|p| p.display().to_string()),
            })?;

            println!(
                "Recorded {} of {} in {} on {}",
                txn.transaction_type.to_string().to_lowercase(),
                txn.amount.format_with(&settings.currency),
                category.name,
                txn.date
            );
            println!("  Account: {}", account.name);
            println!("  ID:      {}", txn.id);
        }

        TransactionCommands::List {
            range,
            account,
            category,
            transaction_type,
            limit,
        } => {
            let mut view = settings.clone();
            if let Some(range) = range {
                view.filter.date_range_type = range;
            }
            if !account.is_empty() {
                view.filter.accounts = account
                    .iter()
                    .map(|a| accounts.resolve(a).map(|a| a.id))
                    .collect::<ExpenseResult<_>>()?;
            }
            if !category.is_empty() {
                view.filter.categories = category
                    .iter()
                    .map(|c| categories.resolve(c).map(|c| c.id))
                    .collect::<ExpenseResult<_>>()?;
            }
            if !transaction_type.is_empty() {
                view.filter.transaction_types = transaction_type;
            }

            let filter = FilterService::new(storage, &view);
            let mut transactions = filter.get_filtered_transactions()?;
            if let Some(limit) = limit {
                transactions.truncate(limit);
            }

            println!(
                "{}{}",
                filter.range_label(),
                if filter.is_filter_enabled() { " (filtered)" } else { "" }
            );
            let names = NameLookup::new(&accounts.list()?, &categories.list()?);
            print!(
                "{}",
                format_transaction_table(&transactions, &names, &settings.currency, &settings.date_format)
            );
        }

        TransactionCommands::Show { id } => {
            let txn = service.resolve(&id)?;
            let names = NameLookup::new(&accounts.list()?, &categories.list()?);
            print!(
                "{}",
                format_transaction_details(&txn, &names, &settings.currency, &settings.date_format)
            );
        }

        TransactionCommands::Edit {
            id,
            amount,
            category,
            account,
            date,
            notes,
            image,
            clear_image,
        } => {
            let txn = service.resolve(&id)?;

            let changes = TransactionUpdate {
                account_id: account.map(|a| accounts.resolve(&a).map(|a| a.id)).transpose()?,
                category_id: category
                    .map(|c| categories.resolve(&c).map(|c| c.id))
                    .transpose()?,
                amount: amount.as_deref().map(parse_money).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                notes,
                image_path: if clear_image {
                    Some(None)
                } else {
                    image.map(|p| Some(p.display().to_string()))
                },
            };

            let updated = service.update(txn.id, changes)?;
            println!("Updated transaction {}", updated.id.short());
        }

        TransactionCommands::Delete { id, yes } => {
            let txn = service.resolve(&id)?;
            require_confirmation(yes, &format!("delete transaction {}", txn.id.short()))?;
            let deleted = service.delete(txn.id)?;
            println!("Deleted transaction {}", deleted.id.short());
        }
    }

    Ok(())
}
