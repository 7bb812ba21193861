//! Report CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::report::{format_analysis, format_overview};
use crate::error::ExpenseResult;
use crate::models::DateRangeType;
use crate::reports::{AccountOverview, AnalysisReport};
use crate::services::FilterService;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Income and expenses by category for the saved filter
    Analysis {
        /// Override the saved date range
        #[arg(short, long, value_enum)]
        range: Option<DateRangeType>,
    },
    /// Balances and shares across accounts
    Accounts,
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    match cmd {
        ReportCommands::Analysis { range } => {
            let mut view = settings.clone();
            if let Some(range) = range {
                view.filter.date_range_type = range;
            }
            let filter = FilterService::new(storage, &view);
            let transactions = filter.get_filtered_transactions()?;
            let report = AnalysisReport::generate(storage, &transactions, filter.range_label())?;
            print!("{}", format_analysis(&report, &settings.currency));
        }
        ReportCommands::Accounts => {
            let overview = AccountOverview::generate(storage)?;
            print!("{}", format_overview(&overview, &settings.currency));
        }
    }
    Ok(())
}
