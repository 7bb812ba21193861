//! Category model
//!
//! Categories are either expense or income. A transaction takes its type
//! from its category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::transaction::TransactionType;

/// Whether a category collects spending or earnings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    #[default]
    Expense,
    Income,
}

impl CategoryType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "expense" | "expenses" => Some(Self::Expense),
            "income" => Some(Self::Income),
            _ => None,
        }
    }

    /// The transaction type recorded under a category of this type
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Expense => TransactionType::Expense,
            Self::Income => TransactionType::Income,
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
        }
    }
}

/// A transaction category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    pub name: String,

    #[serde(rename = "type")]
    pub category_type: CategoryType,

    #[serde(default = "default_icon")]
    pub icon: String,

    /// Display color as `#RRGGBB`
    #[serde(default = "default_color")]
    pub color: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_icon() -> String {
    "tag".to_string()
}

fn default_color() -> String {
    "#607D8B".to_string()
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>, category_type: CategoryType) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            category_type,
            icon: default_icon(),
            color: default_color(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a category with an icon and color
    pub fn with_style(
        name: impl Into<String>,
        category_type: CategoryType,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        let mut category = Self::new(name, category_type);
        category.icon = icon.into();
        category.color = color.into();
        category
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if !super::account::is_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::InvalidColor(color) => {
                write!(f, "Invalid color '{}': expected #RRGGBB", color)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

/// Categories created on first run
pub struct DefaultCategory {
    pub name: &'static str,
    pub category_type: CategoryType,
    pub icon: &'static str,
    pub color: &'static str,
}

pub const DEFAULT_CATEGORIES: &[DefaultCategory] = &[
    DefaultCategory { name: "Food", category_type: CategoryType::Expense, icon: "restaurant", color: "#F44336" },
    DefaultCategory { name: "Groceries", category_type: CategoryType::Expense, icon: "cart", color: "#E91E63" },
    DefaultCategory { name: "Transport", category_type: CategoryType::Expense, icon: "car", color: "#9C27B0" },
    DefaultCategory { name: "Shopping", category_type: CategoryType::Expense, icon: "bag", color: "#673AB7" },
    DefaultCategory { name: "Bills", category_type: CategoryType::Expense, icon: "receipt", color: "#3F51B5" },
    DefaultCategory { name: "Health", category_type: CategoryType::Expense, icon: "medical", color: "#2196F3" },
    DefaultCategory { name: "Entertainment", category_type: CategoryType::Expense, icon: "movie", color: "#00BCD4" },
    DefaultCategory { name: "Education", category_type: CategoryType::Expense, icon: "school", color: "#009688" },
    DefaultCategory { name: "Salary", category_type: CategoryType::Income, icon: "work", color: "#4CAF50" },
    DefaultCategory { name: "Business", category_type: CategoryType::Income, icon: "store", color: "#8BC34A" },
    DefaultCategory { name: "Gifts", category_type: CategoryType::Income, icon: "gift", color: "#CDDC39" },
    DefaultCategory { name: "Other Income", category_type: CategoryType::Income, icon: "coins", color: "#FFC107" },
];
