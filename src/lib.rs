//! Expense Manager - personal expense and income tracking
//!
//! Transactions are recorded against accounts and categories, filtered by a
//! saved date range and selection, and summarised in reports. Everything is
//! stored as JSON files under one data directory, with an audit log of each
//! change.
//!
//! # Architecture
//!
//! - `config`: paths and persisted settings
//! - `error`: the crate error type
//! - `models`: accounts, categories, transactions, money and date ranges
//! - `storage`: JSON repositories and first-run seeding
//! - `audit`: append-only change log
//! - `services`: validation and business rules
//! - `reports`: category analysis and account overview
//! - `export`: CSV, JSON and YAML writers
//! - `display`: plain-text formatting for the CLI
//! - `cli`: clap subcommands
//! - `tui`: the ratatui interface
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_manager::config::{AppPaths, Settings};
//! use expense_manager::storage::Storage;
//!
//! let paths = AppPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::ExpenseError;
