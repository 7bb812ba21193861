//! Transaction display formatting
//!
//! Transaction lists render through `tabled`; details are hand formatted.

use std::collections::HashMap;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Account, AccountId, Category, CategoryId, Currency, Money, Transaction, TransactionType};
use crate::services::date_range::format_date;

/// Account and category names for rendering transactions
#[derive(Debug, Default)]
pub struct NameLookup {
    accounts: HashMap<AccountId, String>,
    categories: HashMap<CategoryId, String>,
}

impl NameLookup {
    pub fn new(accounts: &[Account], categories: &[Category]) -> Self {
        Self {
            accounts: accounts.iter().map(|a| (a.id, a.name.clone())).collect(),
            categories: categories.iter().map(|c| (c.id, c.name.clone())).collect(),
        }
    }

    pub fn account(&self, id: &AccountId) -> &str {
        self.accounts.get(id).map(String::as_str).unwrap_or("Unknown")
    }

    pub fn category(&self, id: &CategoryId) -> &str {
        self.categories.get(id).map(String::as_str).unwrap_or("Unknown")
    }
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

/// Amount with a sign showing which way the money moved
pub fn signed_amount(txn: &Transaction, currency: &Currency) -> String {
    let formatted = txn.amount.format_with(currency);
    match txn.transaction_type {
        TransactionType::Income => format!("+{}", formatted),
        TransactionType::Expense => format!("-{}", formatted),
    }
}

/// Format transactions as a table followed by income/expense totals
pub fn format_transaction_table(
    transactions: &[Transaction],
    names: &NameLookup,
    currency: &Currency,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.short(),
        date: format_date(txn.date, date_format),
        category: names.category(&txn.category_id).to_string(),
        account: names.account(&txn.account_id).to_string(),
        amount: signed_amount(txn, currency),
        notes: truncate(&txn.notes, 40),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()));

    let income: Money = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();
    let expense: Money = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum();

    format!(
        "{}\n{} transaction(s)  Income: {}  Expense: {}  Net: {}\n",
        table,
        transactions.len(),
        income.format_with(currency),
        expense.format_with(currency),
        (income - expense).format_with(currency),
    )
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    names: &NameLookup,
    currency: &Currency,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("  Date:     {}\n", format_date(txn.date, date_format)));
    output.push_str(&format!("  Type:     {}\n", txn.transaction_type));
    output.push_str(&format!("  Amount:   {}\n", signed_amount(txn, currency)));
    output.push_str(&format!("  Account:  {}\n", names.account(&txn.account_id)));
    output.push_str(&format!("  Category: {}\n", names.category(&txn.category_id)));

    if !txn.notes.is_empty() {
        output.push_str(&format!("  Notes:    {}\n", txn.notes));
    }
    if let Some(image) = &txn.image_path {
        output.push_str(&format!("  Image:    {}\n", image));
    }

    output
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
