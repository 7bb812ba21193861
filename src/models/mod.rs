//! Core data models
//!
//! Accounts, categories and transactions, plus the money, currency and
//! date range value types the rest of the crate works with.

pub mod account;
pub mod category;
pub mod currency;
pub mod date_range;
pub mod ids;
pub mod money;
pub mod transaction;

pub use account::{Account, AccountType, AccountValidationError};
pub use category::{Category, CategoryType, CategoryValidationError, DEFAULT_CATEGORIES};
pub use currency::{Currency, CurrencyPosition};
pub use date_range::{DateRange, DateRangeParseError, DateRangeType};
pub use ids::{AccountId, CategoryId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, TransactionType, TransactionValidationError};
