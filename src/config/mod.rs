//! Configuration module
//!
//! - Data directory resolution
//! - Persisted user settings, including the transaction filter state

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{FilterSettings, ReminderSettings, Settings};
