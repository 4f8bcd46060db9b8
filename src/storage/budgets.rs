//! Budget repository for JSON storage
//!
//! Manages loading and saving budgets to budgets.json

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::{Budget, BudgetId, Category};

use super::file_io::{read_json, write_json_atomic};

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<Vec<Budget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), ExpenseError> {
        let budgets: Vec<Budget> = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        tracing::debug!(count = budgets.len(), "loaded budgets");
        *data = budgets;

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        write_json_atomic(&self.path, data.as_slice())
    }

    /// Get a budget by ID
    pub fn get(&self, id: &BudgetId) -> Result<Option<Budget>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.iter().find(|b| &b.id == id).cloned())
    }

    /// Get the budget for a category, if one exists
    pub fn get_by_category(&self, category: &Category) -> Result<Option<Budget>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.iter().find(|b| b.category.same_as(category)).cloned())
    }

    /// Get all budgets in insertion order
    pub fn get_all(&self) -> Result<Vec<Budget>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.clone())
    }

    /// Append a budget
    pub fn push(&self, budget: Budget) -> Result<(), ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.push(budget);
        Ok(())
    }

    /// Delete a budget, returning it if it existed
    pub fn delete(&self, id: &BudgetId) -> Result<Option<Budget>, ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data
            .iter()
            .position(|b| &b.id == id)
            .map(|index| data.remove(index)))
    }

    /// Count budgets
    pub fn count(&self) -> Result<usize, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
