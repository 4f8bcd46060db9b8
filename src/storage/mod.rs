//! Storage layer for expense-cli
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation, plus the audit trail for every mutation.

pub mod budgets;
pub mod expenses;
pub mod file_io;

pub use budgets::BudgetRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLog, EntityType, Operation};
use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::{Budget, Expense};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: ExpensePaths,
    pub expenses: ExpenseRepository,
    pub budgets: BudgetRepository,
    audit: AuditLog,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: ExpensePaths) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            audit: AuditLog::new(paths.audit_log()),
            paths,
        })
    }

    /// Create a Storage and load everything from disk
    pub fn open(paths: ExpensePaths) -> Result<Self, ExpenseError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), ExpenseError> {
        self.expenses.load()?;
        self.budgets.load()?;
        Ok(())
    }

    /// The audit log
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Record an entity creation in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), ExpenseError> {
        self.audit
            .record(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an entity deletion in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), ExpenseError> {
        self.audit
            .record(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    /// Record a file import or export in the audit log
    pub fn log_file_transfer(
        &self,
        operation: Operation,
        path: impl Into<String>,
        summary: String,
    ) -> Result<(), ExpenseError> {
        self.audit
            .record(&AuditEntry::file_transfer(operation, path, summary))
    }

    /// Record one creation per imported record, written as a single batch
    pub fn log_imported(&self, expenses: &[Expense], budgets: &[Budget]) -> Result<(), ExpenseError> {
        let entries: Vec<AuditEntry> = expenses
            .iter()
            .map(|e| {
                AuditEntry::create(EntityType::Expense, e.id.as_str(), Some(e.name.clone()), e)
            })
            .chain(budgets.iter().map(|b| {
                AuditEntry::create(
                    EntityType::Budget,
                    b.id.as_str(),
                    Some(b.category.label().to_string()),
                    b,
                )
            }))
            .collect();
        self.audit.append(&entries)
    }
}
