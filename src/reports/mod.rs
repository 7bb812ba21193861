//! Reports
//!
//! Category analysis of a set of transactions and an overview of account
//! balances.

pub mod analysis;
pub mod overview;

pub use analysis::{ascii_bar, format_percentage, AnalysisReport, CategorySlice};
pub use overview::{AccountOverview, AccountShare};
