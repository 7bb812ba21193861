use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_manager::cli::{
    handle_account_command, handle_category_command, handle_export_command, handle_filter_command,
    handle_history_command, handle_reminder_command, handle_report_command,
    handle_settings_command, handle_transaction_command, AccountCommands, CategoryCommands,
    ExportArgs, FilterCommands, HistoryArgs, ReminderCommands, ReportCommands, SettingsCommands,
    TransactionCommands,
};
use expense_manager::config::paths::{AppPaths, DATA_DIR_ENV};
use expense_manager::config::Settings;
use expense_manager::storage::{initialize_storage, InitSummary, Storage};
use expense_manager::ExpenseError;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Track expenses and income across accounts",
    long_about = "Expense Manager records income and expenses against accounts and \
                  categories, filters them by date range, and reports where the \
                  money went. Run 'expense tui' for the interactive interface."
)]
struct Cli {
    /// Directory holding data, settings and the audit log
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default categories and the Cash account
    Init,

    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Show or change the saved transaction filter
    #[command(subcommand)]
    Filter(FilterCommands),

    /// Category analysis and account overview
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export filtered transactions to CSV, JSON or YAML
    Export(ExportArgs),

    /// Currency, date format and other preferences
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Daily reminder to record transactions
    #[command(subcommand)]
    Reminder(ReminderCommands),

    /// Show the audit log of changes
    History(HistoryArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> ExitCode {
    expense_manager::logging::init_tracing();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            match e.downcast_ref::<ExpenseError>() {
                Some(err) => eprintln!("Error: {}", err.user_message()),
                None => eprintln!("Error: {}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = match cli.data_dir {
        Some(dir) => AppPaths::with_base_dir(dir),
        None => AppPaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;
    let storage = Storage::open(paths.clone())?;

    let Some(command) = cli.command else {
        println!("Expense Manager - track where your money goes");
        println!();
        println!("Run 'expense --help' for usage information.");
        println!("Run 'expense tui' to launch the interactive interface.");
        return Ok(());
    };

    // First use seeds the default categories and account
    let summary = match command {
        Commands::Config => InitSummary::default(),
        _ => initialize_storage(&storage, &mut settings)?,
    };

    match command {
        Commands::Init => {
            println!("Data directory: {}", paths.base_dir().display());
            if summary.categories_created == 0 && !summary.account_created {
                println!("Already initialized.");
            } else {
                println!("Created {} default categories.", summary.categories_created);
                if summary.account_created {
                    println!("Created account: Cash (default)");
                }
            }
            println!();
            println!("Run 'expense category list' to see all categories.");
        }
        Commands::Tui => expense_manager::tui::run_tui(&storage, &mut settings)?,
        Commands::Account(cmd) => handle_account_command(&storage, &mut settings, cmd)?,
        Commands::Category(cmd) => handle_category_command(&storage, &mut settings, cmd)?,
        Commands::Transaction(cmd) => handle_transaction_command(&storage, &settings, cmd)?,
        Commands::Filter(cmd) => handle_filter_command(&storage, &mut settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, &settings, cmd)?,
        Commands::Export(args) => handle_export_command(&storage, &settings, args)?,
        Commands::Settings(cmd) => handle_settings_command(&storage, &mut settings, cmd)?,
        Commands::Reminder(cmd) => handle_reminder_command(&storage, &mut settings, cmd)?,
        Commands::History(args) => handle_history_command(&storage, args)?,
        Commands::Config => print_config(&paths, &settings),
    }

    Ok(())
}

fn print_config(paths: &AppPaths, settings: &Settings) {
    println!("Expense Manager Configuration");
    println!("=============================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Data directory:   {}", paths.data_dir().display());
    println!("Export directory: {}", paths.export_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!();
    println!("Initialized:      {}", if settings.preloaded { "yes" } else { "no" });
}
