//! CSV export
//!
//! One row per transaction: date, notes, category, type, account, amount.

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::error::ExpenseResult;
use crate::models::Transaction;
use crate::storage::Storage;

#[derive(Debug, Serialize)]
struct TransactionRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Notes")]
    notes: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Type")]
    transaction_type: String,
    #[serde(rename = "Account")]
    account: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
}

/// Write `transactions` as CSV, resolving account and category names
pub fn export_transactions_csv<W: Write>(
    storage: &Storage,
    transactions: &[Transaction],
    writer: W,
) -> ExpenseResult<()> {
    let category_names: HashMap<_, _> = storage
        .categories
        .get_all()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let account_names: HashMap<_, _> = storage
        .accounts
        .get_all()?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();

    let mut csv_writer = ::csv::Writer::from_writer(writer);

    for txn in transactions {
        let row = TransactionRow {
            date: txn.date.format("%Y-%m-%d").to_string(),
            notes: &txn.notes,
            category: category_names
                .get(&txn.category_id)
                .map(String::as_str)
                .unwrap_or("Unknown"),
            transaction_type: txn.transaction_type.to_string(),
            account: account_names
                .get(&txn.account_id)
                .map(String::as_str)
                .unwrap_or("Unknown"),
            amount: txn.amount.to_string(),
        };
        csv_writer.serialize(row)?;
    }

    if transactions.is_empty() {
        csv_writer.write_record(["Date", "Notes", "Category", "Type", "Account", "Amount"])?;
    }

    csv_writer.flush()?;
    Ok(())
}
