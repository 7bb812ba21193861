//! JSON export
//!
//! A full export carries the accounts and categories alongside the selected
//! transactions so the file stands on its own.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ExpenseResult;
use crate::models::{Account, Category, Money, Transaction};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub accounts: Vec<Account>,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    pub metadata: ExportMetadata,
}

/// Summary of what the export contains
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Label of the date range the transactions were selected with
    pub date_range: String,
    pub transaction_count: usize,
    pub income_total: Money,
    pub expense_total: Money,
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
}

impl FullExport {
    pub fn build(
        storage: &Storage,
        transactions: Vec<Transaction>,
        date_range: impl Into<String>,
    ) -> ExpenseResult<Self> {
        let income_total = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        let expense_total = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum();

        let metadata = ExportMetadata {
            date_range: date_range.into(),
            transaction_count: transactions.len(),
            income_total,
            expense_total,
            earliest_transaction: transactions.iter().map(|t| t.date).min().map(|d| d.to_string()),
            latest_transaction: transactions.iter().map(|t| t.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            accounts: storage.accounts.get_all()?,
            categories: storage.categories.get_all()?,
            transactions,
            metadata,
        })
    }
}

/// Write a full export as pretty-printed JSON
pub fn export_full_json<W: Write>(export: &FullExport, writer: &mut W) -> ExpenseResult<()> {
    serde_json::to_writer_pretty(&mut *writer, export)
        .map_err(|e| crate::error::ExpenseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| crate::error::ExpenseError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AppPaths;
    use crate::models::{AccountId, CategoryId, TransactionType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_metadata_totals() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(AppPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();

        let make = |kind, cents, day| {
            Transaction::new(
                AccountId::new(),
                CategoryId::new(),
                kind,
                Money::from_cents(cents),
                NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            )
        };
        let transactions = vec![
            make(TransactionType::Income, 5000, 3),
            make(TransactionType::Expense, 1200, 9),
            make(TransactionType::Expense, 300, 1),
        ];

        let export = FullExport::build(&storage, transactions, "October 2026").unwrap();
        assert_eq!(export.metadata.transaction_count, 3);
        assert_eq!(export.metadata.income_total.cents(), 5000);
        assert_eq!(export.metadata.expense_total.cents(), 1500);
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2026-10-01"));
        assert_eq!(export.metadata.latest_transaction.as_deref(), Some("2026-10-09"));

        let mut output = Vec::new();
        export_full_json(&export, &mut output).unwrap();
        let parsed: FullExport = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed.transactions.len(), 3);
        assert_eq!(parsed.metadata.date_range, "October 2026");
    }
}
