//! Transaction model
//!
//! A transaction is an expense or income of a positive amount, recorded
//! against one account and one category.

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CategoryId, TransactionId};
use super::money::Money;

/// Whether money left or entered an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "expense" | "expenses" => Some(Self::Expense),
            "income" => Some(Self::Income),
            _ => None,
        }
    }

    /// Signed change to an account balance for `amount`
    pub fn balance_effect(&self, amount: Money) -> Money {
        match self {
            Self::Income => amount,
            Self::Expense => -amount,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
        }
    }
}

/// A recorded transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Free-text notes
    #[serde(default)]
    pub notes: String,

    pub category_id: CategoryId,

    pub account_id: AccountId,

    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// Amount as a positive magnitude; direction comes from `transaction_type`
    pub amount: Money,

    /// Path to an attached receipt image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,

    /// When the transaction happened
    pub date: NaiveDate,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        account_id: AccountId,
        category_id: CategoryId,
        transaction_type: TransactionType,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            notes: String::new(),
            category_id,
            account_id,
            transaction_type,
            amount,
            image_path: None,
            date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Signed change this transaction makes to its account balance
    pub fn balance_effect(&self) -> Money {
        self.transaction_type.balance_effect(self.amount)
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// Whether the date falls inside `[start, end]`
    pub fn is_within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.date >= start && self.date <= end
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount);
        }

        if !self.amount.is_within_limit() {
            return Err(TransactionValidationError::AmountTooLarge);
        }

        if self.notes.len() > 500 {
            return Err(TransactionValidationError::NotesTooLong(self.notes.len()));
        }

        if let Some(path) = &self.image_path {
            if path.trim().is_empty() {
                return Err(TransactionValidationError::EmptyImagePath);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.transaction_type {
            TransactionType::Income => "+",
            TransactionType::Expense => "-",
        };
        write!(f, "{} {}{}", self.date, sign, self.amount)?;
        if !self.notes.is_empty() {
            write!(f, " {}", self.notes)?;
        }
        Ok(())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount,
    AmountTooLarge,
    NotesTooLong(usize),
    EmptyImagePath,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Amount must be greater than zero"),
            Self::AmountTooLarge => {
                write!(f, "Amount too large (max {})", Money::MAX_AMOUNT)
            }
            Self::NotesTooLong(len) => write!(f, "Notes too long ({} chars, max 500)", len),
            Self::EmptyImagePath => write!(f, "Image path cannot be empty"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
