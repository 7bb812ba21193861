//! YAML export

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::json::FullExport;

/// Write a full export as YAML with a short header comment
pub fn export_full_yaml<W: Write>(export: &FullExport, writer: &mut W) -> ExpenseResult<()> {
    writeln!(writer, "# Expense Manager export")
        .and_then(|_| writeln!(writer, "# Generated: {}", export.exported_at))
        .and_then(|_| writeln!(writer, "# Date range: {}", export.metadata.date_range))
        .and_then(|_| writeln!(writer))
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AppPaths;
    use crate::models::{Account, AccountType};
    use crate::storage::Storage;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_export() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(AppPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        storage
            .accounts
            .upsert(Account::new("Cash", AccountType::Cash))
            .unwrap();

        let export = FullExport::build(&storage, Vec::new(), "All").unwrap();
        let mut output = Vec::new();
        export_full_yaml(&export, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("# Expense Manager export"));
        assert!(text.contains("name: Cash"));

        let parsed: FullExport = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed.accounts.len(), 1);
        assert_eq!(parsed.metadata.date_range, "All");
    }
}
