//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::models::{Account, Currency, Money};

/// Format accounts with balances as a table, with a total row
pub fn format_account_list(accounts: &[Account], currency: &Currency) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(5);

    let type_width = accounts
        .iter()
        .map(|a| a.account_type.to_string().len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<type_width$}  {:>14}  {:>14}  {}\n",
        "Name",
        "Type",
        "Balance",
        "Available",
        "ID",
        name_width = name_width,
        type_width = type_width,
    ));
    output.push_str(&separator_line(name_width, type_width));

    for account in accounts {
        let available = account
            .available_credit()
            .map(|m| m.format_with(currency))
            .unwrap_or_default();
        output.push_str(&format!(
            "{:<name_width$}  {:<type_width$}  {:>14}  {:>14}  {}\n",
            account.name,
            account.account_type,
            account.balance.format_with(currency),
            available,
            account.id.short(),
            name_width = name_width,
            type_width = type_width,
        ));
    }

    let total: Money = accounts.iter().map(|a| a.balance).sum();
    output.push_str(&separator_line(name_width, type_width));
    output.push_str(&format!(
        "{:<name_width$}  {:<type_width$}  {:>14}\n",
        "TOTAL",
        "",
        total.format_with(currency),
        name_width = name_width,
        type_width = type_width,
    ));

    output
}

fn separator_line(name_width: usize, type_width: usize) -> String {
    format!(
        "{:-<name_width$}  {:-<type_width$}  {:->14}  {:->14}  {:-<12}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        type_width = type_width,
    )
}

/// Format a single account's details
pub fn format_account_details(account: &Account, transaction_count: usize, currency: &Currency) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account: {}\n", account.name));
    output.push_str(&format!("  Type:         {}\n", account.account_type));
    output.push_str(&format!("  ID:           {}\n", account.id));
    output.push_str(&format!("  Balance:      {}\n", account.balance.format_with(currency)));
    if let Some(available) = account.available_credit() {
        output.push_str(&format!(
            "  Credit Limit: {}\n",
            account.credit_limit.format_with(currency)
        ));
        output.push_str(&format!("  Available:    {}\n", available.format_with(currency)));
    }
    output.push_str(&format!("  Color:        {}\n", account.color));
    output.push_str(&format!("  Icon:         {}\n", account.icon));
    output.push_str(&format!("  Transactions: {}\n", transaction_count));

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        account.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        account.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;

    #[test]
    fn test_format_account_list() {
        let accounts = vec![
            Account::with_balance("Checking", AccountType::Bank, Money::from_cents(100000)),
            Account::with_balance("Wallet", AccountType::Cash, Money::from_cents(2550)),
        ];

        let output = format_account_list(&accounts, &Currency::default());
        assert!(output.contains("Checking"));
        assert!(output.contains("Wallet"));
        assert!(output.contains("TOTAL"));
        assert!(output.contains("$1025.50"));
    }

    #[test]
    fn test_format_empty_list() {
        let output = format_account_list(&[], &Currency::default());
        assert!(output.contains("No accounts found"));
    }

    #[test]
    fn test_credit_details() {
        let mut card = Account::with_balance("Visa", AccountType::Credit, Money::from_cents(-2500));
        card.credit_limit = Money::from_cents(100000);

        let output = format_account_details(&card, 3, &Currency::default());
        assert!(output.contains("Credit Card"));
        assert!(output.contains("Available:    $975.00"));
        assert!(output.contains("Transactions: 3"));
    }
}
