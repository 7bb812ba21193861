//! Export CLI command

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::error::ExpenseResult;
use crate::export::ExportFormat;
use crate::models::DateRangeType;
use crate::services::{AccountService, ExportRequest, ExportService};
use crate::storage::Storage;

/// Export arguments
#[derive(Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Output file; defaults to a timestamped file in the export directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Date range of the exported transactions
    #[arg(short, long, value_enum, default_value = "this-month")]
    pub range: DateRangeType,

    /// Accounts to export (repeatable); all accounts when omitted
    #[arg(short, long)]
    pub account: Vec<String>,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, settings: &Settings, args: ExportArgs) -> ExpenseResult<()> {
    let accounts = AccountService::new(storage);
    let selected = args
        .account
        .iter()
        .map(|a| accounts.resolve(a).map(|a| a.id))
        .collect::<ExpenseResult<Vec<_>>>()?;

    let outcome = ExportService::new(storage, settings).export(ExportRequest {
        format: args.format,
        output: args.output,
        date_range_type: args.range,
        all_accounts_selected: selected.is_empty(),
        accounts: selected,
    })?;

    println!(
        "Exported {} transaction(s) as {} to {}",
        outcome.transactions,
        args.format,
        outcome.path.display()
    );
    Ok(())
}
