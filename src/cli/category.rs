//! Category CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::category::{format_category_details, format_category_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::CategoryType;
use crate::services::{CategoryService, CategoryUpdate, SettingsService};
use crate::storage::Storage;

use super::require_confirmation;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// Category type (expense, income)
        #[arg(short = 't', long = "type", default_value = "expense")]
        category_type: String,
        #[arg(long)]
        icon: Option<String>,
        /// Display color, #RRGGBB
        #[arg(long)]
        color: Option<String>,
    },
    /// List categories
    List {
        /// Only show one type (expense, income)
        #[arg(short = 't', long = "type")]
        category_type: Option<String>,
    },
    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },
    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short = 't', long = "type")]
        category_type: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a category and all of its transactions
    Delete {
        /// Category name or ID
        category: String,
        /// Skip the confirmation requirement
        #[arg(short, long)]
        yes: bool,
    },
}

fn parse_category_type(value: &str) -> ExpenseResult<CategoryType> {
    CategoryType::parse(value).ok_or_else(|| {
        ExpenseError::Validation(format!(
            "Invalid category type: '{}'. Valid types: expense, income",
            value
        ))
    })
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: CategoryCommands,
) -> ExpenseResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::Create {
            name,
            category_type,
            icon,
            color,
        } => {
            let category = service.create(
                &name,
                parse_category_type(&category_type)?,
                icon.as_deref(),
                color.as_deref(),
            )?;
            println!("Created category: {} ({})", category.name, category.category_type);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::List { category_type } => {
            let categories = match category_type {
                Some(kind) => service.list_by_type(parse_category_type(&kind)?)?,
                None => service.list()?,
            };
            println!("{}", format_category_list(&categories).trim_end());
        }

        CategoryCommands::Show { category } => {
            let found = service.resolve(&category)?;
            let count = storage.transactions.count_by_category(found.id)?;
            print!("{}", format_category_details(&found, count));
        }

        CategoryCommands::Edit {
            category,
            name,
            category_type,
            icon,
            color,
        } => {
            let found = service.resolve(&category)?;
            let changes = CategoryUpdate {
                name,
                category_type: category_type.as_deref().map(parse_category_type).transpose()?,
                icon,
                color,
            };
            if changes.name.is_none()
                && changes.category_type.is_none()
                && changes.icon.is_none()
                && changes.color.is_none()
            {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(found.id, changes)?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Delete { category, yes } => {
            let found = service.resolve(&category)?;
            require_confirmation(yes, &format!("delete category '{}'", found.name))?;

            let deleted = service.delete(found.id)?;
            SettingsService::new(storage, settings).forget_category(found.id)?;

            println!(
                "Deleted category: {} ({} transaction(s) removed)",
                deleted.category.name, deleted.transactions_removed
            );
        }
    }

    Ok(())
}
