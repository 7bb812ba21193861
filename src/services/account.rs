//! Account service
//!
//! Account CRUD, balance bookkeeping and credit totals.

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Account, AccountId, AccountType, Money};
use crate::storage::Storage;

/// Input for creating an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub account_type: AccountType,
    pub opening_balance: Money,
    pub credit_limit: Money,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl NewAccount {
    pub fn new(name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            name: name.into(),
            account_type,
            opening_balance: Money::zero(),
            credit_limit: Money::zero(),
            color: None,
            icon: None,
        }
    }
}

/// Fields to change on an existing account; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub account_type: Option<AccountType>,
    pub credit_limit: Option<Money>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub sequence: Option<i32>,
}

/// Result of deleting an account
#[derive(Debug, Clone)]
pub struct DeletedAccount {
    pub account: Account,
    pub transactions_removed: usize,
}

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a Storage,
}

impl<'a> AccountService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new account
    ///
    /// The account is validated before anything is written; a rejected
    /// account leaves the repository and the audit log untouched.
    pub fn create(&self, input: NewAccount) -> ExpenseResult<Account> {
        let mut account =
            Account::with_balance(input.name.trim(), input.account_type, input.opening_balance);
        account.credit_limit = input.credit_limit;
        if let Some(color) = input.color {
            account.color = color;
        }
        if let Some(icon) = input.icon {
            account.icon = icon;
        }

        account
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        if self.storage.accounts.name_exists(&account.name, None)? {
            return Err(ExpenseError::Duplicate {
                entity_type: "Account",
                identifier: account.name,
            });
        }

        account.sequence = self.storage.accounts.next_sequence()?;

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        self.storage.log_create(
            EntityType::Account,
            account.id.to_string(),
            Some(account.name.clone()),
            &account,
        )?;

        tracing::info!(account = %account.id.short(), name = %account.name, "created account");
        Ok(account)
    }

    pub fn get(&self, id: AccountId) -> ExpenseResult<Option<Account>> {
        self.storage.accounts.get(id)
    }

    /// Find an account by name or ID string
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Account>> {
        if let Some(account) = self.storage.accounts.get_by_name(identifier)? {
            return Ok(Some(account));
        }

        if let Ok(id) = identifier.parse::<AccountId>() {
            return self.storage.accounts.get(id);
        }

        let mut matches: Vec<_> = self
            .storage
            .accounts
            .get_all()?
            .into_iter()
            .filter(|a| a.id.matches(identifier))
            .collect();
        if matches.len() > 1 {
            return Err(ExpenseError::ambiguous_id("Account", identifier, matches.len()));
        }
        Ok(matches.pop())
    }

    /// Like [`find`](Self::find) but a missing account is an error
    pub fn resolve(&self, identifier: &str) -> ExpenseResult<Account> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::account_not_found(identifier))
    }

    pub fn list(&self) -> ExpenseResult<Vec<Account>> {
        self.storage.accounts.get_all()
    }

    /// Update an account
    pub fn update(&self, id: AccountId, changes: AccountUpdate) -> ExpenseResult<Account> {
        let mut account = self
            .storage
            .accounts
            .get(id)?
            .ok_or_else(|| ExpenseError::account_not_found(id.to_string()))?;

        let before = account.clone();

        if let Some(name) = changes.name {
            account.name = name.trim().to_string();
        }
        if let Some(account_type) = changes.account_type {
            account.account_type = account_type;
            if !account_type.is_credit() {
                account.credit_limit = Money::zero();
            }
        }
        if let Some(limit) = changes.credit_limit {
            account.credit_limit = limit;
        }
        if let Some(color) = changes.color {
            account.color = color;
        }
        if let Some(icon) = changes.icon {
            account.icon = icon;
        }
        if let Some(sequence) = changes.sequence {
            account.sequence = sequence;
        }

        account
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        if self.storage.accounts.name_exists(&account.name, Some(id))? {
            return Err(ExpenseError::Duplicate {
                entity_type: "Account",
                identifier: account.name,
            });
        }

        account.updated_at = chrono::Utc::now();

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        self.storage.log_update(
            EntityType::Account,
            account.id.to_string(),
            Some(account.name.clone()),
            &before,
            &account,
        )?;

        Ok(account)
    }

    /// Delete an account together with its transactions
    pub fn delete(&self, id: AccountId) -> ExpenseResult<DeletedAccount> {
        let account = self
            .storage
            .accounts
            .get(id)?
            .ok_or_else(|| ExpenseError::account_not_found(id.to_string()))?;

        let removed = self.storage.transactions.delete_by_account(id)?;
        if !removed.is_empty() {
            self.storage.transactions.save()?;
        }
        for txn in &removed {
            self.storage.log_delete(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(txn.notes.clone()).filter(|n| !n.is_empty()),
                txn,
            )?;
        }

        self.storage.accounts.delete(id)?;
        self.storage.accounts.save()?;

        self.storage.log_delete(
            EntityType::Account,
            account.id.to_string(),
            Some(account.name.clone()),
            &account,
        )?;

        tracing::info!(
            account = %account.id.short(),
            transactions = removed.len(),
            "deleted account"
        );

        Ok(DeletedAccount {
            account,
            transactions_removed: removed.len(),
        })
    }

    /// Add `delta` to an account's balance without saving
    ///
    /// Callers save the account repository once all changes are applied.
    pub(crate) fn apply_balance_change(&self, id: AccountId, delta: Money) -> ExpenseResult<()> {
        let mut account = self
            .storage
            .accounts
            .get(id)?
            .ok_or_else(|| ExpenseError::account_not_found(id.to_string()))?;

        account
            .adjust_balance(delta)
            .map_err(|e| ExpenseError::Validation(format!("{}: {}", account.name, e)))?;
        self.storage.accounts.upsert(account)
    }

    /// Sum of all account balances
    pub fn total_balance(&self) -> ExpenseResult<Money> {
        Ok(self.list()?.iter().map(|a| a.balance).sum())
    }

    /// Credit still available across all credit accounts
    pub fn available_credit(&self) -> ExpenseResult<Money> {
        Ok(self
            .list()?
            .iter()
            .filter_map(|a| a.available_credit())
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AppPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_account() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        let mut input = NewAccount::new("  Savings ", AccountType::Bank);
        input.opening_balance = Money::from_cents(100000);
        let account = service.create(input).unwrap();

        assert_eq!(account.name, "Savings");
        assert_eq!(account.balance.cents(), 100000);
        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_blank_name_touches_nothing() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        let result = service.create(NewAccount::new("   ", AccountType::Cash));

        assert!(matches!(result, Err(ExpenseError::Validation(_))));
        assert_eq!(storage.accounts.count().unwrap(), 0);
        assert!(!storage.paths().accounts_file().exists());
        assert!(storage.audit().read_all().unwrap().is_empty());
    }

    #[test]
    fn test_create_duplicate_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        service.create(NewAccount::new("Cash", AccountType::Cash)).unwrap();
        let result = service.create(NewAccount::new("cash", AccountType::Bank));
        assert!(matches!(result, Err(ExpenseError::Duplicate { .. })));
    }

    #[test]
    fn test_credit_limit_only_for_credit_accounts() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        let mut input = NewAccount::new("Bank", AccountType::Bank);
        input.credit_limit = Money::from_cents(5000);
        assert!(service.create(input).unwrap_err().is_validation());

        let mut input = NewAccount::new("Card", AccountType::Credit);
        input.credit_limit = Money::from_cents(5000);
        let card = service.create(input).unwrap();
        assert_eq!(card.credit_limit.cents(), 5000);
    }

    #[test]
    fn test_find_account() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        let created = service
            .create(NewAccount::new("My Wallet", AccountType::Cash))
            .unwrap();

        assert_eq!(service.find("my wallet").unwrap().unwrap().id, created.id);
        assert_eq!(
            service.find(&created.id.to_string()).unwrap().unwrap().id,
            created.id
        );
        assert_eq!(
            service.find(&created.id.short()).unwrap().unwrap().id,
            created.id
        );
        assert!(service.resolve("nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_find_ambiguous_prefix_is_an_error() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        for (name, id) in [
            ("Wallet", "abcd0000-0000-4000-8000-000000000001"),
            ("Savings", "abcd0000-0000-4000-8000-000000000002"),
        ] {
            let mut account = Account::new(name, AccountType::Cash);
            account.id = id.parse().unwrap();
            storage.accounts.upsert(account).unwrap();
        }

        assert!(service.find("acc-abcd").unwrap_err().is_validation());
        assert_eq!(
            service.resolve("abcd0000-0000-4000-8000-000000000002").unwrap().name,
            "Savings"
        );
        assert_eq!(service.resolve("wallet").unwrap().name, "Wallet");
    }

    #[test]
    fn test_update_account() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        let account = service
            .create(NewAccount::new("Old Name", AccountType::Bank))
            .unwrap();

        let updated = service
            .update(
                account.id,
                AccountUpdate {
                    name: Some("New Name".into()),
                    color: Some("#112233".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.color, "#112233");

        let bad = service.update(
            account.id,
            AccountUpdate {
                color: Some("blue".into()),
                ..Default::default()
            },
        );
        assert!(bad.unwrap_err().is_validation());
        assert_eq!(service.get(account.id).unwrap().unwrap().color, "#112233");
    }

    #[test]
    fn test_totals() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        let mut cash = NewAccount::new("Cash", AccountType::Cash);
        cash.opening_balance = Money::from_cents(2000);
        service.create(cash).unwrap();

        let mut card = NewAccount::new("Card", AccountType::Credit);
        card.credit_limit = Money::from_cents(10000);
        card.opening_balance = Money::from_cents(-3000);
        service.create(card).unwrap();

        assert_eq!(service.total_balance().unwrap().cents(), -1000);
        assert_eq!(service.available_credit().unwrap().cents(), 7000);
    }
}
