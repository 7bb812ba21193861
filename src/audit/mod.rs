//! Audit logging
//!
//! Records every create, update and delete of accounts, categories and
//! transactions, plus settings changes, in an append-only JSONL log.
//!
//! - `AuditEntry`: one operation with optional before/after values and a
//!   summary of the changed fields.
//! - `AuditLogger`: appends entries to `audit.log` and reads them back for
//!   `expense history`.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
