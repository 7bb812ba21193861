//! Report formatting for terminal output

use crate::models::{Currency, TransactionType};
use crate::reports::{ascii_bar, AccountOverview, AnalysisReport};

const BAR_WIDTH: usize = 20;

/// Format the analysis report with a bar per category
pub fn format_analysis(report: &AnalysisReport, currency: &Currency) -> String {
    let mut output = String::new();

    output.push_str(&format!("Analysis: {}\n", report.period));
    output.push_str(&double_separator(72));
    output.push('\n');
    output.push_str(&format!("Income:   {}\n", report.income_total.format_with(currency)));
    output.push_str(&format!("Expense:  {}\n", report.expense_total.format_with(currency)));
    output.push_str(&format!("Net:      {}\n", report.net().format_with(currency)));
    output.push_str(&format!("Transactions: {}\n", report.transaction_count));

    if report.is_empty() {
        output.push_str("\nNo transactions in this period.\n");
        return output;
    }

    for (heading, kind) in [("EXPENSES", TransactionType::Expense), ("INCOME", TransactionType::Income)] {
        let slices = report.slices(kind);
        if slices.is_empty() {
            continue;
        }
        output.push('\n');
        output.push_str(heading);
        output.push('\n');
        output.push_str(&separator(72));
        output.push('\n');
        for slice in slices {
            output.push_str(&format!(
                "{:<20} {:>12} {:>5} {} {:>8}\n",
                truncate(&slice.category_name, 20),
                slice.amount.format_with(currency),
                slice.transaction_count,
                ascii_bar(slice.percentage, BAR_WIDTH),
                slice.percentage_label(),
            ));
        }
    }

    output
}

/// Format the account overview
pub fn format_overview(overview: &AccountOverview, currency: &Currency) -> String {
    let mut output = String::new();

    output.push_str("Accounts\n");
    output.push_str(&double_separator(72));
    output.push('\n');

    for share in &overview.accounts {
        output.push_str(&format!(
            "{:<20} {:<12} {:>12} {} {:>8}\n",
            truncate(&share.name, 20),
            share.account_type.to_string(),
            share.balance.format_with(currency),
            ascii_bar(share.share, BAR_WIDTH),
            share.share_label(),
        ));
    }

    output.push_str(&separator(72));
    output.push('\n');
    output.push_str(&format!(
        "Total balance:    {}\n",
        overview.total_balance.format_with(currency)
    ));
    output.push_str(&format!(
        "Credit available: {}\n",
        overview.available_credit.format_with(currency)
    ));

    output
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountType, Money};

    #[test]
    fn test_overview_output() {
        let accounts = vec![
            Account::with_balance("Cash", AccountType::Cash, Money::from_cents(5000)),
            Account::with_balance("Bank", AccountType::Bank, Money::from_cents(5000)),
        ];
        let overview = AccountOverview::from_accounts(&accounts);
        let output = format_overview(&overview, &Currency::default());

        assert!(output.contains("50.00%"));
        assert!(output.contains("Total balance:    $100.00"));
    }

    #[test]
    fn test_separators() {
        assert_eq!(separator(3), "───");
        assert_eq!(double_separator(2), "══");
    }
}
