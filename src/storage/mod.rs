//! Storage layer
//!
//! JSON file repositories with atomic writes, plus the audit logger every
//! mutation goes through.

pub mod accounts;
pub mod categories;
pub mod file_io;
pub mod init;
pub mod transactions;

pub use accounts::AccountRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, InitSummary};
pub use transactions::TransactionRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::AppPaths;
use crate::error::ExpenseError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: AppPaths,
    pub accounts: AccountRepository,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a storage rooted at `paths`; nothing is read until `load_all`
    pub fn new(paths: AppPaths) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        Ok(Self {
            accounts: AccountRepository::new(paths.accounts_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Create a storage and load everything from disk
    pub fn open(paths: AppPaths) -> Result<Self, ExpenseError> {
        let mut storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), ExpenseError> {
        self.accounts.load()?;
        self.transactions.load()?;
        self.categories.load()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), ExpenseError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), ExpenseError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), ExpenseError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountType};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
        assert_eq!(storage.accounts.count().unwrap(), 0);
    }

    #[test]
    fn test_log_create_writes_audit_entry() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let account = Account::new("Cash", AccountType::Cash);
        storage
            .log_create(
                EntityType::Account,
                account.id.to_string(),
                Some(account.name.clone()),
                &account,
            )
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity_name.as_deref(), Some("Cash"));
    }
}
