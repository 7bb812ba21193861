//! Analysis report
//!
//! Income and expense totals for a set of transactions, broken down by
//! category with each category's share of its type's total.

use std::collections::HashMap;

use crate::error::ExpenseResult;
use crate::models::{CategoryId, Money, Transaction, TransactionType};
use crate::storage::Storage;

/// One category's share of a breakdown
#[derive(Debug, Clone)]
pub struct CategorySlice {
    pub category_id: CategoryId,
    pub category_name: String,
    /// Category color, `#RRGGBB`
    pub color: String,
    pub amount: Money,
    pub transaction_count: usize,
    /// Share of the type's total, 0..=100
    pub percentage: f64,
}

impl CategorySlice {
    /// Percentage with two decimals, e.g. `42.50%`
    pub fn percentage_label(&self) -> String {
        format_percentage(self.percentage)
    }
}

/// Income/expense totals and per-category breakdowns
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Label of the period the report covers
    pub period: String,
    pub income_total: Money,
    pub expense_total: Money,
    pub transaction_count: usize,
    /// Expense categories, largest first
    pub expense_slices: Vec<CategorySlice>,
    /// Income categories, largest first
    pub income_slices: Vec<CategorySlice>,
}

impl AnalysisReport {
    /// Build the report for `transactions`, resolving category names from storage
    pub fn generate(
        storage: &Storage,
        transactions: &[Transaction],
        period: impl Into<String>,
    ) -> ExpenseResult<Self> {
        let categories: HashMap<CategoryId, _> = storage
            .categories
            .get_all()?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let mut totals: HashMap<(TransactionType, CategoryId), (Money, usize)> = HashMap::new();
        let mut income_total = Money::zero();
        let mut expense_total = Money::zero();

        for txn in transactions {
            match txn.transaction_type {
                TransactionType::Income => income_total = income_total.saturating_add(txn.amount),
                TransactionType::Expense => {
                    expense_total = expense_total.saturating_add(txn.amount)
                }
            }
            let entry = totals
                .entry((txn.transaction_type, txn.category_id))
                .or_insert((Money::zero(), 0));
            entry.0 = entry.0.saturating_add(txn.amount);
            entry.1 += 1;
        }

        let mut expense_slices = Vec::new();
        let mut income_slices = Vec::new();

        for ((kind, category_id), (amount, count)) in totals {
            let (name, color) = match categories.get(&category_id) {
                Some(c) => (c.name.clone(), c.color.clone()),
                None => ("Unknown".to_string(), String::new()),
            };
            let type_total = match kind {
                TransactionType::Income => income_total,
                TransactionType::Expense => expense_total,
            };
            let slice = CategorySlice {
                category_id,
                category_name: name,
                color,
                amount,
                transaction_count: count,
                percentage: percentage_of(amount, type_total),
            };
            match kind {
                TransactionType::Income => income_slices.push(slice),
                TransactionType::Expense => expense_slices.push(slice),
            }
        }

        sort_slices(&mut expense_slices);
        sort_slices(&mut income_slices);

        Ok(Self {
            period: period.into(),
            income_total,
            expense_total,
            transaction_count: transactions.len(),
            expense_slices,
            income_slices,
        })
    }

    /// Income minus expenses
    pub fn net(&self) -> Money {
        self.income_total - self.expense_total
    }

    pub fn slices(&self, kind: TransactionType) -> &[CategorySlice] {
        match kind {
            TransactionType::Income => &self.income_slices,
            TransactionType::Expense => &self.expense_slices,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}

fn sort_slices(slices: &mut [CategorySlice]) {
    slices.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category_name.to_lowercase().cmp(&b.category_name.to_lowercase()))
    });
}

/// Share of `part` in `total` as a percentage; 0 when the total is zero
pub fn percentage_of(part: Money, total: Money) -> f64 {
    if total.is_zero() {
        0.0
    } else {
        part.cents() as f64 / total.cents() as f64 * 100.0
    }
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Horizontal bar like `████░░░░` filled in proportion to `percentage`
pub fn ascii_bar(percentage: f64, width: usize) -> String {
    let clamped = if percentage.is_finite() {
        percentage.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AppPaths;
    use crate::models::{AccountId, Category, CategoryType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(AppPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        (temp_dir, storage)
    }

    fn txn(category: &Category, cents: i64) -> Transaction {
        Transaction::new(
            AccountId::new(),
            category.id,
            category.category_type.transaction_type(),
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2026, 10, 5).unwrap(),
        )
    }

    #[test]
    fn test_breakdown_by_category() {
        let (_temp_dir, storage) = create_test_storage();
        let food = Category::new("Food", CategoryType::Expense);
        let rent = Category::new("Rent", CategoryType::Expense);
        let salary = Category::new("Salary", CategoryType::Income);
        for c in [&food, &rent, &salary] {
            storage.categories.upsert(c.clone()).unwrap();
        }

        let transactions = vec![
            txn(&food, 1500),
            txn(&food, 2500),
            txn(&rent, 6000),
            txn(&salary, 200000),
        ];
        let report = AnalysisReport::generate(&storage, &transactions, "October 2026").unwrap();

        assert_eq!(report.expense_total.cents(), 10000);
        assert_eq!(report.income_total.cents(), 200000);
        assert_eq!(report.net().cents(), 190000);
        assert_eq!(report.transaction_count, 4);

        let expenses = report.slices(TransactionType::Expense);
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].category_name, "Rent");
        assert_eq!(expenses[0].percentage_label(), "60.00%");
        assert_eq!(expenses[1].category_name, "Food");
        assert_eq!(expenses[1].transaction_count, 2);
        assert_eq!(expenses[1].percentage_label(), "40.00%");

        let income = report.slices(TransactionType::Income);
        assert_eq!(income.len(), 1);
        assert_eq!(income[0].percentage_label(), "100.00%");
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let (_temp_dir, storage) = create_test_storage();
        let cats: Vec<_> = ["A", "B", "C"]
            .iter()
            .map(|n| Category::new(*n, CategoryType::Expense))
            .collect();
        let transactions: Vec<_> = cats.iter().map(|c| txn(c, 333)).collect();

        let report = AnalysisReport::generate(&storage, &transactions, "All").unwrap();
        let sum: f64 = report.expense_slices.iter().map(|s| s.percentage).sum();

        assert!((sum - 100.0).abs() < 0.001);
        assert_eq!(report.expense_slices[0].category_name, "Unknown");
    }

    #[test]
    fn test_empty_report() {
        let (_temp_dir, storage) = create_test_storage();
        let report = AnalysisReport::generate(&storage, &[], "All").unwrap();

        assert!(report.is_empty());
        assert!(report.expense_slices.is_empty());
        assert!(report.net().is_zero());
        assert_eq!(percentage_of(Money::zero(), Money::zero()), 0.0);
        assert_eq!(format_percentage(0.0), "0.00%");
    }

    #[test]
    fn test_ascii_bar() {
        assert_eq!(ascii_bar(50.0, 10), "█████░░░░░");
        assert_eq!(ascii_bar(0.0, 4), "░░░░");
        assert_eq!(ascii_bar(150.0, 4), "████");
        assert_eq!(ascii_bar(f64::NAN, 3), "░░░");
    }
}
