//! Account repository for JSON storage
//!
//! Accounts live in accounts.json, written in display order: by `sequence`,
//! then by name. Names are unique ignoring case and surrounding spaces.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::ExpenseError;
use crate::models::{Account, AccountId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AccountData {
    accounts: Vec<Account>,
}

type AccountMap = HashMap<AccountId, Account>;

/// Repository for account persistence
pub struct AccountRepository {
    path: PathBuf,
    data: RwLock<AccountMap>,
}

/// Order accounts are listed and saved in
fn display_order(a: &Account, b: &Account) -> Ordering {
    a.sequence
        .cmp(&b.sequence)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then(a.created_at.cmp(&b.created_at))
}

fn same_name(account: &Account, name: &str) -> bool {
    account.name.trim().to_lowercase() == name.trim().to_lowercase()
}

impl AccountRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, AccountMap>, ExpenseError> {
        self.data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, AccountMap>, ExpenseError> {
        self.data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: AccountData = read_json(&self.path)?;
        *self.write()? = file_data.accounts.into_iter().map(|a| (a.id, a)).collect();
        Ok(())
    }

    pub fn save(&self) -> Result<(), ExpenseError> {
        let accounts = self.get_all()?;
        write_json_atomic(&self.path, &AccountData { accounts })
    }

    pub fn get(&self, id: AccountId) -> Result<Option<Account>, ExpenseError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// All accounts in display order
    pub fn get_all(&self) -> Result<Vec<Account>, ExpenseError> {
        let mut accounts: Vec<_> = self.read()?.values().cloned().collect();
        accounts.sort_by(display_order);
        Ok(accounts)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<Account>, ExpenseError> {
        Ok(self.read()?.values().find(|a| same_name(a, name)).cloned())
    }

    /// Whether another account already uses `name`
    pub fn name_exists(
        &self,
        name: &str,
        exclude_id: Option<AccountId>,
    ) -> Result<bool, ExpenseError> {
        Ok(self
            .read()?
            .values()
            .any(|a| Some(a.id) != exclude_id && same_name(a, name)))
    }

    pub fn upsert(&self, account: Account) -> Result<(), ExpenseError> {
        self.write()?.insert(account.id, account);
        Ok(())
    }

    /// Remove an account, reporting whether it existed
    pub fn delete(&self, id: AccountId) -> Result<bool, ExpenseError> {
        Ok(self.write()?.remove(&id).is_some())
    }

    pub fn exists(&self, id: AccountId) -> Result<bool, ExpenseError> {
        Ok(self.read()?.contains_key(&id))
    }

    /// Position for a newly created account: after every existing one
    pub fn next_sequence(&self) -> Result<i32, ExpenseError> {
        Ok(self
            .read()?
            .values()
            .map(|a| a.sequence.saturating_add(1))
            .max()
            .unwrap_or(0))
    }

    pub fn count(&self) -> Result<usize, ExpenseError> {
        Ok(self.read()?.len())
    }
}
