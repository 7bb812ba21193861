//! `history` command: recent audit log entries

use clap::Args;

use crate::error::ExpenseResult;
use crate::storage::Storage;

#[derive(Args)]
pub struct HistoryArgs {
    /// Number of entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,

    /// Only show one entity type (account, category, transaction, settings)
    #[arg(short, long)]
    pub entity: Option<String>,
}

pub fn handle_history_command(storage: &Storage, args: HistoryArgs) -> ExpenseResult<()> {
    let mut entries = storage.audit().read_all()?;
    if let Some(entity) = &args.entity {
        let wanted = entity.to_lowercase();
        entries.retain(|e| e.entity_type.to_string().to_lowercase() == wanted);
    }

    let skip = entries.len().saturating_sub(args.limit);
    let recent = &entries[skip..];

    if recent.is_empty() {
        println!("No history recorded.");
        return Ok(());
    }
    for entry in recent {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
