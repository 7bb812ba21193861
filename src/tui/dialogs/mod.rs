//! Modal dialogs drawn over the active screen

pub mod confirm;
pub mod filter;
pub mod help;

pub use filter::{FilterDialogState, FilterSection};
