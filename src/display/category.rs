//! Category display formatting

use crate::models::{Category, CategoryType};

/// Format categories grouped by type
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    for (heading, kind) in [("EXPENSE", CategoryType::Expense), ("INCOME", CategoryType::Income)] {
        let members: Vec<_> = categories.iter().filter(|c| c.category_type == kind).collect();
        if members.is_empty() {
            continue;
        }
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&format!("{}\n", heading));
        for category in members {
            output.push_str(&format!(
                "  {:<name_width$}  {:<8}  {:<16}  {}\n",
                category.name,
                category.color,
                category.icon,
                category.id.short(),
                name_width = name_width,
            ));
        }
    }

    output
}

/// Format a single category's details
pub fn format_category_details(category: &Category, transaction_count: usize) -> String {
    let mut output = String::new();
    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  Type:         {}\n", category.category_type));
    output.push_str(&format!("  ID:           {}\n", category.id));
    output.push_str(&format!("  Color:        {}\n", category.color));
    output.push_str(&format!("  Icon:         {}\n", category.icon));
    output.push_str(&format!("  Transactions: {}\n", transaction_count));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_by_type() {
        let categories = vec![
            Category::new("Food", CategoryType::Expense),
            Category::new("Salary", CategoryType::Income),
        ];

        let output = format_category_list(&categories);
        let expense_at = output.find("EXPENSE").unwrap();
        let income_at = output.find("INCOME").unwrap();
        assert!(expense_at < income_at);
        assert!(output.contains("Food"));
        assert!(output.contains("Salary"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(format_category_list(&[]), "No categories found.");
    }
}
