//! Service layer
//!
//! Business rules on top of the storage layer: validation, balance
//! bookkeeping, filter composition and settings changes. Each service borrows
//! the storage (and settings where needed) for the length of one operation.

pub mod account;
pub mod category;
pub mod date_range;
pub mod export;
pub mod filter;
pub mod reminder;
pub mod settings;
pub mod transaction;

pub use account::{AccountService, AccountUpdate, DeletedAccount, NewAccount};
pub use category::{CategoryService, CategoryUpdate, DeletedCategory};
pub use date_range::DateRangeService;
pub use export::{ExportOutcome, ExportRequest, ExportService};
pub use filter::{FilterQuery, FilterService};
pub use reminder::ReminderService;
pub use settings::SettingsService;
pub use transaction::{NewTransaction, TransactionService, TransactionUpdate};
