//! Category service
//!
//! Category CRUD. Changing a category's type is refused once transactions use
//! it, and deleting a category removes its transactions and restores the
//! balances they affected.

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, CategoryId, CategoryType};
use crate::storage::Storage;

use super::account::AccountService;

/// Fields to change on an existing category
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub category_type: Option<CategoryType>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// Result of deleting a category
#[derive(Debug, Clone)]
pub struct DeletedCategory {
    pub category: Category,
    pub transactions_removed: usize,
}

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a category
    pub fn create(
        &self,
        name: &str,
        category_type: CategoryType,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> ExpenseResult<Category> {
        let mut category = Category::new(name.trim(), category_type);
        if let Some(icon) = icon {
            category.icon = icon.to_string();
        }
        if let Some(color) = color {
            category.color = color.to_string();
        }

        category
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        if self
            .storage
            .categories
            .name_exists(&category.name, category_type, None)?
        {
            return Err(ExpenseError::Duplicate {
                entity_type: "Category",
                identifier: category.name,
            });
        }

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }

    pub fn get(&self, id: CategoryId) -> ExpenseResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name or ID string
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return self.storage.categories.get(id);
        }

        let mut matches: Vec<_> = self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .filter(|c| c.id.matches(identifier))
            .collect();
        if matches.len() > 1 {
            return Err(ExpenseError::ambiguous_id("Category", identifier, matches.len()));
        }
        Ok(matches.pop())
    }

    pub fn resolve(&self, identifier: &str) -> ExpenseResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::category_not_found(identifier))
    }

    pub fn list(&self) -> ExpenseResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    pub fn list_by_type(&self, category_type: CategoryType) -> ExpenseResult<Vec<Category>> {
        self.storage.categories.get_by_type(category_type)
    }

    /// Update a category
    pub fn update(&self, id: CategoryId, changes: CategoryUpdate) -> ExpenseResult<Category> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| ExpenseError::category_not_found(id.to_string()))?;

        let before = category.clone();

        if let Some(name) = changes.name {
            category.name = name.trim().to_string();
        }
        if let Some(icon) = changes.icon {
            category.icon = icon;
        }
        if let Some(color) = changes.color {
            category.color = color;
        }
        if let Some(category_type) = changes.category_type {
            if category_type != category.category_type
                && self.storage.transactions.count_by_category(id)? > 0
            {
                return Err(ExpenseError::Validation(format!(
                    "Cannot change the type of '{}' while it has transactions",
                    category.name
                )));
            }
            category.category_type = category_type;
        }

        category
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        if self
            .storage
            .categories
            .name_exists(&category.name, category.category_type, Some(id))?
        {
            return Err(ExpenseError::Duplicate {
                entity_type: "Category",
                identifier: category.name,
            });
        }

        category.updated_at = chrono::Utc::now();

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_update(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &before,
            &category,
        )?;

        Ok(category)
    }

    /// Delete a category and its transactions, restoring account balances
    pub fn delete(&self, id: CategoryId) -> ExpenseResult<DeletedCategory> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| ExpenseError::category_not_found(id.to_string()))?;

        let removed = self.storage.transactions.delete_by_category(id)?;
        if !removed.is_empty() {
            let accounts = AccountService::new(self.storage);
            for txn in &removed {
                accounts.apply_balance_change(txn.account_id, -txn.balance_effect())?;
            }
            self.storage.transactions.save()?;
            self.storage.accounts.save()?;

            for txn in &removed {
                self.storage.log_delete(
                    EntityType::Transaction,
                    txn.id.to_string(),
                    Some(category.name.clone()),
                    txn,
                )?;
            }
        }

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        tracing::info!(
            category = %category.id.short(),
            transactions = removed.len(),
            "deleted category"
        );

        Ok(DeletedCategory {
            category,
            transactions_removed: removed.len(),
        })
    }
}
