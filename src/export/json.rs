//! JSON export
//!
//! Writes every expense and budget to a single pretty-printed document
//! `{ "expenses": [...], "budgets": [...] }` that `data import` reads back.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::audit::Operation;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Budget, Expense};
use crate::storage::{write_json_atomic, Storage};

/// Full data export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataExport {
    pub expenses: Vec<Expense>,
    pub budgets: Vec<Budget>,
}

impl DataExport {
    /// Snapshot the store
    pub fn from_storage(storage: &Storage) -> ExpenseResult<Self> {
        Ok(Self {
            expenses: storage.expenses.get_all()?,
            budgets: storage.budgets.get_all()?,
        })
    }
}

/// Default export file name for a date, e.g. `expense-data-2024-01-15.json`
pub fn default_export_filename(date: NaiveDate) -> String {
    format!("expense-data-{}.json", date.format("%Y-%m-%d"))
}

/// Write the whole store to `path`, or to the dated default name in the
/// current directory when `path` is `None`
pub fn export_to_file(storage: &Storage, path: Option<&Path>) -> ExpenseResult<(PathBuf, DataExport)> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(default_export_filename(chrono::Local::now().date_naive())),
    };

    let export = DataExport::from_storage(storage)?;
    write_json_atomic(&path, &export)
        .map_err(|e| ExpenseError::Export(format!("Failed to write {}: {}", path.display(), e)))?;

    storage.log_file_transfer(
        Operation::Export,
        path.display().to_string(),
        format!(
            "{} expenses, {} budgets",
            export.expenses.len(),
            export.budgets.len()
        ),
    )?;

    tracing::info!(path = %path.display(), "exported data");
    Ok((path, export))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::{Category, Money};
    use tempfile::TempDir;

    #[test]
    fn test_default_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(default_export_filename(date), "expense-data-2024-01-05.json");
    }

    #[test]
    fn test_export_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().join("store"));
        let storage = Storage::open(paths).unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        storage
            .expenses
            .prepend(Expense::new("Coffee", Money::from_cents(15_000), date, Category::Food))
            .unwrap();
        storage
            .budgets
            .push(Budget::new(Category::Food, Money::from_cents(100_000)))
            .unwrap();

        let target = temp_dir.path().join("out.json");
        let (written, export) = export_to_file(&storage, Some(&target)).unwrap();
        assert_eq!(written, target);
        assert_eq!(export.expenses.len(), 1);

        let raw = std::fs::read_to_string(&target).unwrap();
        assert!(raw.contains("\n  \"expenses\""));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["expenses"][0]["amount"], 150);
        assert_eq!(value["budgets"][0]["period"], "monthly");

        let audit = storage.audit().entries().unwrap();
        assert_eq!(audit.last().unwrap().operation, Operation::Export);
    }
}
