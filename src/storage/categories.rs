//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::{Category, CategoryId, CategoryType};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    pub categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut categories = self
            .categories
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        let file_data = CategoryData {
            categories: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, ExpenseError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.get(&id).cloned())
    }

    /// All categories, expense first, then by name
    pub fn get_all(&self) -> Result<Vec<Category>, ExpenseError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        list.sort_by(|a, b| {
            (a.category_type == CategoryType::Income)
                .cmp(&(b.category_type == CategoryType::Income))
                .then(a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(list)
    }

    pub fn get_by_type(&self, category_type: CategoryType) -> Result<Vec<Category>, ExpenseError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|c| c.category_type == category_type)
            .collect())
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, ExpenseError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(categories
            .values()
            .find(|c| c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Whether `name` is taken by another category of the same type
    pub fn name_exists(
        &self,
        name: &str,
        category_type: CategoryType,
        exclude_id: Option<CategoryId>,
    ) -> Result<bool, ExpenseError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.trim().to_lowercase();
        Ok(categories.values().any(|c| {
            c.category_type == category_type
                && c.name.to_lowercase() == name_lower
                && Some(c.id) != exclude_id
        }))
    }

    /// Insert or update a category
    pub fn upsert(&self, category: Category) -> Result<(), ExpenseError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        categories.insert(category.id, category);
        Ok(())
    }

    pub fn delete(&self, id: CategoryId) -> Result<bool, ExpenseError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(categories.remove(&id).is_some())
    }

    pub fn count(&self) -> Result<usize, ExpenseError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.len())
    }
}
