//! Terminal user interface
//!
//! Four screens (transactions, accounts, categories, analysis) over the
//! same services the CLI uses, plus filter, help and delete dialogs.

pub mod app;
pub mod dialogs;
pub mod event;
pub mod handler;
pub mod layout;
pub mod screens;
pub mod terminal;
pub mod viewmodel;

pub use app::App;
pub use terminal::run_tui;
