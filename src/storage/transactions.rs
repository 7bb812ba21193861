//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json, and answers
//! the account/date queries the filter is built from. Every query returns
//! transactions newest first.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::ExpenseError;
use crate::models::{AccountId, CategoryId, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with indexing
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: account_id -> transaction_ids
    by_account: RwLock<HashMap<AccountId, Vec<TransactionId>>>,
    /// Index: category_id -> transaction_ids
    by_category: RwLock<HashMap<CategoryId, Vec<TransactionId>>>,
}

fn newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

fn read_lock_err<E: std::fmt::Display>(e: E) -> ExpenseError {
    ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
}

fn write_lock_err<E: std::fmt::Display>(e: E) -> ExpenseError {
    ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_account: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build indexes
    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(write_lock_err)?;
        let mut by_account = self.by_account.write().map_err(write_lock_err)?;
        let mut by_category = self.by_category.write().map_err(write_lock_err)?;

        data.clear();
        by_account.clear();
        by_category.clear();

        for txn in file_data.transactions {
            by_account.entry(txn.account_id).or_default().push(txn.id);
            by_category.entry(txn.category_id).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self.data.read().map_err(read_lock_err)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        newest_first(&mut transactions);

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, ExpenseError> {
        let data = self.data.read().map_err(read_lock_err)?;
        Ok(data.get(&id).cloned())
    }

    /// Find a transaction by full ID or short-form prefix
    ///
    /// A prefix shared by several transactions is an error, never a guess.
    pub fn find(&self, identifier: &str) -> Result<Option<Transaction>, ExpenseError> {
        let data = self.data.read().map_err(read_lock_err)?;
        let matches: Vec<_> = data.values().filter(|t| t.id.matches(identifier)).collect();
        match matches.as_slice() {
            [] => Ok(None),
            [txn] => Ok(Some((*txn).clone())),
            _ => Err(ExpenseError::ambiguous_id("Transaction", identifier, matches.len())),
        }
    }

    /// Get all transactions
    pub fn get_all(&self) -> Result<Vec<Transaction>, ExpenseError> {
        let data = self.data.read().map_err(read_lock_err)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Transactions belonging to any of `account_ids`
    pub fn get_by_accounts(
        &self,
        account_ids: &[AccountId],
    ) -> Result<Vec<Transaction>, ExpenseError> {
        let data = self.data.read().map_err(read_lock_err)?;
        let by_account = self.by_account.read().map_err(read_lock_err)?;

        let unique: HashSet<_> = account_ids.iter().collect();
        let mut transactions: Vec<_> = unique
            .into_iter()
            .filter_map(|account_id| by_account.get(account_id))
            .flatten()
            .filter_map(|id| data.get(id).cloned())
            .collect();
        newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Transactions dated within `[start, end]`
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, ExpenseError> {
        let data = self.data.read().map_err(read_lock_err)?;

        let mut transactions: Vec<_> = data
            .values()
            .filter(|t| t.is_within(start, end))
            .cloned()
            .collect();
        newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Transactions belonging to any of `account_ids` dated within `[start, end]`
    pub fn get_by_accounts_and_date_range(
        &self,
        account_ids: &[AccountId],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, ExpenseError> {
        Ok(self
            .get_by_accounts(account_ids)?
            .into_iter()
            .filter(|t| t.is_within(start, end))
            .collect())
    }

    pub fn get_by_account(&self, account_id: AccountId) -> Result<Vec<Transaction>, ExpenseError> {
        self.get_by_accounts(&[account_id])
    }

    pub fn get_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Transaction>, ExpenseError> {
        let data = self.data.read().map_err(read_lock_err)?;
        let by_category = self.by_category.read().map_err(read_lock_err)?;

        let ids = by_category
            .get(&category_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        newest_first(&mut transactions);
        Ok(transactions)
    }

    pub fn count_by_account(&self, account_id: AccountId) -> Result<usize, ExpenseError> {
        let by_account = self.by_account.read().map_err(read_lock_err)?;
        Ok(by_account.get(&account_id).map(|v| v.len()).unwrap_or(0))
    }

    pub fn count_by_category(&self, category_id: CategoryId) -> Result<usize, ExpenseError> {
        let by_category = self.by_category.read().map_err(read_lock_err)?;
        Ok(by_category.get(&category_id).map(|v| v.len()).unwrap_or(0))
    }

    /// Whether anything was recorded on `date`
    pub fn has_transaction_on(&self, date: NaiveDate) -> Result<bool, ExpenseError> {
        let data = self.data.read().map_err(read_lock_err)?;
        Ok(data.values().any(|t| t.date == date))
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), ExpenseError> {
        let mut data = self.data.write().map_err(write_lock_err)?;
        let mut by_account = self.by_account.write().map_err(write_lock_err)?;
        let mut by_category = self.by_category.write().map_err(write_lock_err)?;

        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_account.get_mut(&old.account_id) {
                ids.retain(|&id| id != txn.id);
            }
            if let Some(ids) = by_category.get_mut(&old.category_id) {
                ids.retain(|&id| id != txn.id);
            }
        }

        by_account.entry(txn.account_id).or_default().push(txn.id);
        by_category.entry(txn.category_id).or_default().push(txn.id);
        data.insert(txn.id, txn);

        Ok(())
    }

    /// Delete a transaction, returning it if it existed
    pub fn delete(&self, id: TransactionId) -> Result<Option<Transaction>, ExpenseError> {
        let mut data = self.data.write().map_err(write_lock_err)?;
        let mut by_account = self.by_account.write().map_err(write_lock_err)?;
        let mut by_category = self.by_category.write().map_err(write_lock_err)?;

        let removed = data.remove(&id);
        if let Some(txn) = &removed {
            if let Some(ids) = by_account.get_mut(&txn.account_id) {
                ids.retain(|&tid| tid != id);
            }
            if let Some(ids) = by_category.get_mut(&txn.category_id) {
                ids.retain(|&tid| tid != id);
            }
        }

        Ok(removed)
    }

    /// Delete every transaction of an account, returning what was removed
    pub fn delete_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Transaction>, ExpenseError> {
        let ids: Vec<_> = self
            .get_by_account(account_id)?
            .into_iter()
            .map(|t| t.id)
            .collect();
        self.delete_many(&ids)
    }

    /// Delete every transaction of a category, returning what was removed
    pub fn delete_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Transaction>, ExpenseError> {
        let ids: Vec<_> = self
            .get_by_category(category_id)?
            .into_iter()
            .map(|t| t.id)
            .collect();
        self.delete_many(&ids)
    }

    fn delete_many(&self, ids: &[TransactionId]) -> Result<Vec<Transaction>, ExpenseError> {
        let mut removed = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(txn) = self.delete(*id)? {
                removed.push(txn);
            }
        }
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize, ExpenseError> {
        let data = self.data.read().map_err(read_lock_err)?;
        Ok(data.len())
    }
}
