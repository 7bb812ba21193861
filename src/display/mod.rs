//! Display formatting for terminal output
//!
//! Formats accounts, categories, transactions and reports for the CLI.

pub mod account;
pub mod category;
pub mod report;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use category::{format_category_details, format_category_list};
pub use report::{format_analysis, format_overview};
pub use transaction::{format_transaction_details, format_transaction_table, NameLookup};
