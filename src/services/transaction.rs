//! Transaction service
//!
//! Records transactions and keeps account balances in step: creating applies
//! the balance effect, updating reverts the old effect and applies the new
//! one, deleting reverts it.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{AccountId, CategoryId, Money, Transaction, TransactionId};
use crate::storage::Storage;

use super::account::AccountService;

/// Input for recording a transaction
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub account_id: AccountId,
    pub category_id: CategoryId,
    pub amount: Money,
    pub date: NaiveDate,
    pub notes: String,
    pub image_path: Option<String>,
}

/// Fields to change on an existing transaction
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub account_id: Option<AccountId>,
    pub category_id: Option<CategoryId>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
    /// `Some(None)` removes the attached image
    pub image_path: Option<Option<String>>,
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a transaction; its type is taken from the category
    pub fn create(&self, input: NewTransaction) -> ExpenseResult<Transaction> {
        let category = self
            .storage
            .categories
            .get(input.category_id)?
            .ok_or_else(|| ExpenseError::category_not_found(input.category_id.to_string()))?;

        if !self.storage.accounts.exists(input.account_id)? {
            return Err(ExpenseError::account_not_found(input.account_id.to_string()));
        }

        let mut txn = Transaction::new(
            input.account_id,
            input.category_id,
            category.category_type.transaction_type(),
            input.amount,
            input.date,
        );
        txn.notes = input.notes.trim().to_string();
        txn.image_path = input.image_path;

        txn.validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        AccountService::new(self.storage).apply_balance_change(txn.account_id, txn.balance_effect())?;
        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;
        self.storage.accounts.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(category.name),
            &txn,
        )?;

        tracing::info!(
            transaction = %txn.id.short(),
            kind = %txn.transaction_type,
            amount = txn.amount.cents(),
            "recorded transaction"
        );
        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> ExpenseResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full ID or short-form prefix
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Transaction>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.storage.transactions.get(id);
        }
        self.storage.transactions.find(identifier)
    }

    pub fn resolve(&self, identifier: &str) -> ExpenseResult<Transaction> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::transaction_not_found(identifier))
    }

    pub fn list_for_account(&self, account_id: AccountId) -> ExpenseResult<Vec<Transaction>> {
        self.storage.transactions.get_by_account(account_id)
    }

    pub fn list_for_category(&self, category_id: CategoryId) -> ExpenseResult<Vec<Transaction>> {
        self.storage.transactions.get_by_category(category_id)
    }

    /// Update a transaction
    pub fn update(&self, id: TransactionId, changes: TransactionUpdate) -> ExpenseResult<Transaction> {
        let before = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| ExpenseError::transaction_not_found(id.to_string()))?;

        let mut txn = before.clone();

        if let Some(account_id) = changes.account_id {
            if !self.storage.accounts.exists(account_id)? {
                return Err(ExpenseError::account_not_found(account_id.to_string()));
            }
            txn.account_id = account_id;
        }

        if let Some(category_id) = changes.category_id {
            let category = self
                .storage
                .categories
                .get(category_id)?
                .ok_or_else(|| ExpenseError::category_not_found(category_id.to_string()))?;
            txn.category_id = category_id;
            txn.transaction_type = category.category_type.transaction_type();
        }

        if let Some(amount) = changes.amount {
            txn.amount = amount;
        }
        if let Some(date) = changes.date {
            txn.date = date;
        }
        if let Some(notes) = changes.notes {
            txn.notes = notes.trim().to_string();
        }
        if let Some(image_path) = changes.image_path {
            txn.image_path = image_path;
        }

        txn.validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;
        txn.touch();

        let accounts = AccountService::new(self.storage);
        accounts.apply_balance_change(before.account_id, -before.balance_effect())?;
        if let Err(e) = accounts.apply_balance_change(txn.account_id, txn.balance_effect()) {
            accounts.apply_balance_change(before.account_id, before.balance_effect())?;
            return Err(e);
        }

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;
        self.storage.accounts.save()?;

        self.storage.log_update(
            EntityType::Transaction,
            txn.id.to_string(),
            None,
            &before,
            &txn,
        )?;

        Ok(txn)
    }

    /// Delete a transaction and revert its balance effect
    pub fn delete(&self, id: TransactionId) -> ExpenseResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| ExpenseError::transaction_not_found(id.to_string()))?;

        AccountService::new(self.storage).apply_balance_change(txn.account_id, -txn.balance_effect())?;
        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;
        self.storage.accounts.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.notes.clone()).filter(|n| !n.is_empty()),
            &txn,
        )?;

        tracing::info!(transaction = %txn.id.short(), "deleted transaction");
        Ok(txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AppPaths;
    use crate::models::{Account, AccountType, Category, CategoryType, TransactionType};
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        storage: Storage,
        cash: AccountId,
        bank: AccountId,
        food: CategoryId,
        salary: CategoryId,
    }

    fn fixture() -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        let cash = Account::new("Cash", AccountType::Cash);
        let bank = Account::new("Bank", AccountType::Bank);
        let food = Category::new("Food", CategoryType::Expense);
        let salary = Category::new("Salary", CategoryType::Income);
        let ids = (cash.id, bank.id, food.id, salary.id);
        storage.accounts.upsert(cash).unwrap();
        storage.accounts.upsert(bank).unwrap();
        storage.categories.upsert(food).unwrap();
        storage.categories.upsert(salary).unwrap();

        Fixture {
            _temp_dir: temp_dir,
            storage,
            cash: ids.0,
            bank: ids.1,
            food: ids.2,
            salary: ids.3,
        }
    }

    fn new_txn(account_id: AccountId, category_id: CategoryId, cents: i64) -> NewTransaction {
        NewTransaction {
            account_id,
            category_id,
            amount: Money::from_cents(cents),
            date: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
            notes: "  lunch ".into(),
            image_path: None,
        }
    }

    fn balance(f: &Fixture, id: AccountId) -> i64 {
        f.storage.accounts.get(id).unwrap().unwrap().balance.cents()
    }

    #[test]
    fn test_create_applies_balance_effect() {
        let f = fixture();
        let service = TransactionService::new(&f.storage);

        let expense = service.create(new_txn(f.cash, f.food, 1500)).unwrap();
        assert_eq!(expense.transaction_type, TransactionType::Expense);
        assert_eq!(expense.notes, "lunch");
        assert_eq!(balance(&f, f.cash), -1500);

        let income = service.create(new_txn(f.cash, f.salary, 5000)).unwrap();
        assert_eq!(income.transaction_type, TransactionType::Income);
        assert_eq!(balance(&f, f.cash), 3500);
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let f = fixture();
        let service = TransactionService::new(&f.storage);

        assert!(service
            .create(new_txn(f.cash, f.food, 0))
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(new_txn(AccountId::new(), f.food, 100))
            .unwrap_err()
            .is_not_found());
        assert!(service
            .create(new_txn(f.cash, CategoryId::new(), 100))
            .unwrap_err()
            .is_not_found());

        assert_eq!(f.storage.transactions.count().unwrap(), 0);
        assert_eq!(balance(&f, f.cash), 0);
    }

    #[test]
    fn test_oversized_amount_is_rejected() {
        let f = fixture();
        let service = TransactionService::new(&f.storage);
        let mut input = new_txn(f.cash, f.salary, 0);
        input.amount = Money::parse("90000000000000000").unwrap();

        assert!(service.create(input.clone()).unwrap_err().is_validation());
        assert!(service.create(input).unwrap_err().is_validation());
        assert_eq!(f.storage.transactions.count().unwrap(), 0);
        assert_eq!(balance(&f, f.cash), 0);
    }

    #[test]
    fn test_balance_overflow_leaves_state_unchanged() {
        let f = fixture();
        let service = TransactionService::new(&f.storage);

        let mut cash = f.storage.accounts.get(f.cash).unwrap().unwrap();
        cash.balance = Money::from_cents(i64::MAX - 100);
        f.storage.accounts.upsert(cash).unwrap();

        let err = service.create(new_txn(f.cash, f.salary, 500)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(f.storage.transactions.count().unwrap(), 0);
        assert_eq!(balance(&f, f.cash), i64::MAX - 100);

        // Moving income onto the full account fails and restores the bank balance
        let txn = service.create(new_txn(f.bank, f.salary, 500)).unwrap();
        let err = service
            .update(
                txn.id,
                TransactionUpdate {
                    account_id: Some(f.cash),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(balance(&f, f.bank), 500);
        assert_eq!(balance(&f, f.cash), i64::MAX - 100);
    }

    #[test]
    fn test_update_moves_balance() {
        let f = fixture();
        let service = TransactionService::new(&f.storage);

        let txn = service.create(new_txn(f.cash, f.food, 1000)).unwrap();
        service
            .update(
                txn.id,
                TransactionUpdate {
                    account_id: Some(f.bank),
                    category_id: Some(f.salary),
                    amount: Some(Money::from_cents(2500)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(balance(&f, f.cash), 0);
        assert_eq!(balance(&f, f.bank), 2500);

        let updated = service.get(txn.id).unwrap().unwrap();
        assert_eq!(updated.transaction_type, TransactionType::Income);
    }

    #[test]
    fn test_update_same_account_changes_amount() {
        let f = fixture();
        let service = TransactionService::new(&f.storage);

        let txn = service.create(new_txn(f.cash, f.food, 1000)).unwrap();
        service
            .update(
                txn.id,
                TransactionUpdate {
                    amount: Some(Money::from_cents(400)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(balance(&f, f.cash), -400);
    }

    #[test]
    fn test_delete_reverts_balance() {
        let f = fixture();
        let service = TransactionService::new(&f.storage);

        let txn = service.create(new_txn(f.cash, f.food, 1000)).unwrap();
        service.delete(txn.id).unwrap();

        assert_eq!(balance(&f, f.cash), 0);
        assert!(service.get(txn.id).unwrap().is_none());
        assert!(service.delete(txn.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_find_by_short_id() {
        let f = fixture();
        let service = TransactionService::new(&f.storage);

        let txn = service.create(new_txn(f.cash, f.food, 1000)).unwrap();
        assert_eq!(service.resolve(&txn.id.short()).unwrap().id, txn.id);
        assert_eq!(service.list_for_account(f.cash).unwrap().len(), 1);
        assert_eq!(service.list_for_category(f.salary).unwrap().len(), 0);
    }
}
