//! JSON import service
//!
//! Merges an exported data file into the store. Records are deduplicated by
//! id, budgets additionally by category, and malformed records are skipped
//! and counted rather than failing the whole import.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::audit::Operation;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Budget, Category, Expense};
use crate::storage::Storage;

/// Outcome for one record type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    /// Skipped because the id (or budget category) already exists
    pub duplicates: usize,
    /// Skipped because the record could not be read or failed validation
    pub invalid: usize,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} imported, {} duplicates, {} invalid",
            self.imported, self.duplicates, self.invalid
        )
    }
}

/// Result of an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportResult {
    pub expenses: ImportSummary,
    pub budgets: ImportSummary,
}

impl ImportResult {
    pub fn total_imported(&self) -> usize {
        self.expenses.imported + self.budgets.imported
    }
}

/// Service for importing exported data files
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import a file written by `data export`
    pub fn import_file(&self, path: &Path) -> ExpenseResult<ImportResult> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ExpenseError::Import(format!(
                "Invalid file format: cannot read {}: {}",
                path.display(),
                e
            ))
        })?;

        let result = self.import_str(&contents)?;

        self.storage.log_file_transfer(
            Operation::Import,
            path.display().to_string(),
            format!("expenses: {}; budgets: {}", result.expenses, result.budgets),
        )?;

        Ok(result)
    }

    /// Import from a JSON document
    ///
    /// The document must be an object; `expenses` and `budgets` are optional
    /// but must be arrays when present. Nothing is applied if the document is
    /// malformed.
    pub fn import_str(&self, json: &str) -> ExpenseResult<ImportResult> {
        let document: Value = serde_json::from_str(json)
            .map_err(|e| ExpenseError::Import(format!("Invalid file format: {}", e)))?;

        let Value::Object(document) = document else {
            return Err(ExpenseError::Import(
                "Invalid file format: expected a JSON object".into(),
            ));
        };

        let raw_expenses = array_field(&document, "expenses")?;
        let raw_budgets = array_field(&document, "budgets")?;

        let mut result = ImportResult::default();

        let mut new_expenses: Vec<Expense> = Vec::new();
        let mut seen_ids: HashSet<String> = HashSet::new();
        for raw in raw_expenses {
            let Some(expense) = parse_record::<Expense>(raw, |e| e.validate().is_ok()) else {
                result.expenses.invalid += 1;
                continue;
            };
            if self.storage.expenses.contains(&expense.id)?
                || !seen_ids.insert(expense.id.to_string())
            {
                result.expenses.duplicates += 1;
                continue;
            }
            new_expenses.push(expense);
        }

        let existing_budgets = self.storage.budgets.get_all()?;
        let mut taken_ids: HashSet<String> =
            existing_budgets.iter().map(|b| b.id.to_string()).collect();
        let mut taken_categories: Vec<Category> =
            existing_budgets.into_iter().map(|b| b.category).collect();
        let mut new_budgets: Vec<Budget> = Vec::new();
        for raw in raw_budgets {
            let Some(budget) = parse_record::<Budget>(raw, |b| b.validate().is_ok()) else {
                result.budgets.invalid += 1;
                continue;
            };
            if taken_ids.contains(budget.id.as_str())
                || taken_categories.iter().any(|c| c.same_as(&budget.category))
            {
                result.budgets.duplicates += 1;
                continue;
            }
            taken_ids.insert(budget.id.to_string());
            taken_categories.push(budget.category.clone());
            new_budgets.push(budget);
        }

        result.expenses.imported = new_expenses.len();
        result.budgets.imported = new_budgets.len();

        if !new_expenses.is_empty() {
            self.storage.expenses.prepend_many(new_expenses.clone())?;
            self.storage.expenses.save()?;
        }
        for budget in &new_budgets {
            self.storage.budgets.push(budget.clone())?;
        }
        if result.budgets.imported > 0 {
            self.storage.budgets.save()?;
        }
        self.storage.log_imported(&new_expenses, &new_budgets)?;

        tracing::info!(
            expenses = result.expenses.imported,
            budgets = result.budgets.imported,
            "import finished"
        );
        Ok(result)
    }
}

/// Fetch an optional array field; present-but-not-array is a format error
fn array_field<'v>(
    document: &'v serde_json::Map<String, Value>,
    key: &str,
) -> ExpenseResult<&'v [Value]> {
    match document.get(key) {
        None | Some(Value::Null) => Ok(Default::default()),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(ExpenseError::Import(format!(
            "Invalid file format: '{}' must be an array",
            key
        ))),
    }
}

fn parse_record<T: DeserializeOwned>(raw: &Value, is_valid: impl Fn(&T) -> bool) -> Option<T> {
    match serde_json::from_value::<T>(raw.clone()) {
        Ok(record) if is_valid(&record) => Some(record),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "skipping unreadable record");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::export::export_to_file;
    use crate::models::{ExpenseId, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage(dir: &TempDir, name: &str) -> Storage {
        let paths = ExpensePaths::with_base_dir(dir.path().join(name));
        Storage::open(paths).unwrap()
    }

    fn expense(id: &str, name: &str) -> Expense {
        let mut expense = Expense::new(
            name,
            Money::from_cents(1_000),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            Category::Food,
        );
        expense.id = ExpenseId::from(id);
        expense
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let source = create_test_storage(&temp_dir, "source");
        source.expenses.prepend(expense("1", "Coffee")).unwrap();
        source.expenses.prepend(expense("2", "Lunch")).unwrap();
        source
            .budgets
            .push(Budget::new(Category::Food, Money::from_cents(50_000)))
            .unwrap();

        let file = temp_dir.path().join("export.json");
        export_to_file(&source, Some(&file)).unwrap();

        let target = create_test_storage(&temp_dir, "target");
        let result = ImportService::new(&target).import_file(&file).unwrap();
        assert_eq!(result.expenses.imported, 2);
        assert_eq!(result.budgets.imported, 1);

        assert_eq!(
            target.expenses.get_all().unwrap(),
            source.expenses.get_all().unwrap()
        );
        assert_eq!(
            target.budgets.get_all().unwrap(),
            source.budgets.get_all().unwrap()
        );
    }

    #[test]
    fn test_merge_skips_duplicates_and_prepends_new() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir, "store");
        storage.expenses.prepend(expense("1", "Existing")).unwrap();
        storage
            .budgets
            .push(Budget::new(Category::Food, Money::from_cents(50_000)))
            .unwrap();

        let json = r#"{
            "expenses": [
                {"id": "1", "name": "Existing", "amount": 10, "date": "2024-01-10", "category": "Food"},
                {"id": "2", "name": "New A", "amount": 5, "date": "2024-01-11", "category": "Pets"},
                {"id": "3", "name": "New B", "amount": 7.25, "date": "2024-01-12", "category": "Bills"},
                {"id": "3", "name": "Repeat", "amount": 7.25, "date": "2024-01-12", "category": "Bills"}
            ],
            "budgets": [
                {"id": "b1", "category": "Food", "amount": 100, "period": "monthly"},
                {"id": "b2", "category": "Travel", "amount": 300},
                {"id": "b3", "category": "Travel", "amount": 400}
            ]
        }"#;

        let result = ImportService::new(&storage).import_str(json).unwrap();
        assert_eq!(
            result.expenses,
            ImportSummary {
                imported: 2,
                duplicates: 2,
                invalid: 0
            }
        );
        assert_eq!(result.budgets.imported, 1);
        assert_eq!(result.budgets.duplicates, 2);

        let names: Vec<String> = storage
            .expenses
            .get_all()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["New A", "New B", "Existing"]);

        let pets = storage.expenses.get(&ExpenseId::from("2")).unwrap().unwrap();
        assert_eq!(pets.category, Category::Custom("Pets".into()));

        let budgets = storage.budgets.get_all().unwrap();
        assert_eq!(budgets[1].category, Category::Travel);
        assert_eq!(budgets[1].amount.cents(), 30_000);
    }

    #[test]
    fn test_custom_budget_categories_dedupe_ignoring_case() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir, "store");

        let json = r#"{
            "budgets": [
                {"id": "b1", "category": "pets", "amount": 50},
                {"id": "b2", "category": "Pets", "amount": 60},
                {"id": "b3", "category": " PETS ", "amount": 70}
            ]
        }"#;

        let result = ImportService::new(&storage).import_str(json).unwrap();
        assert_eq!(result.budgets.imported, 1);
        assert_eq!(result.budgets.duplicates, 2);

        let again = ImportService::new(&storage)
            .import_str(r#"{"budgets": [{"id": "b9", "category": "PETS", "amount": 10}]}"#)
            .unwrap();
        assert_eq!(again.budgets.duplicates, 1);
        assert_eq!(storage.budgets.count().unwrap(), 1);
    }

    #[test]
    fn test_each_imported_record_is_audited() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir, "store");
        storage.expenses.prepend(expense("1", "Existing")).unwrap();

        let json = r#"{
            "expenses": [
                {"id": "1", "name": "Existing", "amount": 10, "date": "2024-01-10", "category": "Food"},
                {"id": "2", "name": "Taxi", "amount": 18, "date": "2024-01-11", "category": "Transportation"},
                {"id": "3", "name": "Museum", "amount": 12, "date": "2024-01-12", "category": "Entertainment"}
            ],
            "budgets": [{"id": "b1", "category": "Travel", "amount": 300}]
        }"#;
        let file = temp_dir.path().join("import.json");
        std::fs::write(&file, json).unwrap();

        ImportService::new(&storage).import_file(&file).unwrap();

        let entries = storage.audit().entries().unwrap();
        let created: Vec<&str> = entries
            .iter()
            .filter(|e| e.operation == Operation::Create)
            .map(|e| e.entity_id.as_str())
            .collect();
        assert_eq!(created, vec!["2", "3", "b1"]);
        assert_eq!(entries.last().unwrap().operation, Operation::Import);
    }

    #[test]
    fn test_out_of_range_amount_is_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir, "store");

        let json = r#"{
            "expenses": [
                {"id": "1", "name": "Huge", "amount": 50000000000000000, "date": "2024-01-10", "category": "Food"},
                {"id": "2", "name": "Ok", "amount": 10000000000000, "date": "2024-01-10", "category": "Food"}
            ],
            "budgets": [{"id": "b1", "category": "Food", "amount": 1e300}]
        }"#;

        let result = ImportService::new(&storage).import_str(json).unwrap();
        assert_eq!(result.expenses.imported, 1);
        assert_eq!(result.expenses.invalid, 1);
        assert_eq!(result.budgets.invalid, 1);
    }

    #[test]
    fn test_invalid_records_are_counted() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir, "store");

        let json = r#"{
            "expenses": [
                {"id": "1", "name": "", "amount": 10, "date": "2024-01-10", "category": "Food"},
                {"id": "2", "name": "Bad date", "amount": 10, "date": "yesterday", "category": "Food"},
                {"id": "3", "name": "Zero", "amount": 0, "date": "2024-01-10", "category": "Food"},
                {"id": "4", "name": "Ok", "amount": 1, "date": "2024-01-10", "category": "Food"},
                "not an object"
            ],
            "budgets": [
                {"id": "b1", "category": "Food", "amount": 0}
            ]
        }"#;

        let result = ImportService::new(&storage).import_str(json).unwrap();
        assert_eq!(result.expenses.imported, 1);
        assert_eq!(result.expenses.invalid, 4);
        assert_eq!(result.budgets.invalid, 1);
        assert_eq!(storage.budgets.count().unwrap(), 0);
    }

    #[test]
    fn test_malformed_document_applies_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir, "store");
        let service = ImportService::new(&storage);

        for json in [
            "not json",
            "[]",
            r#"{"expenses": {"id": "1"}}"#,
            r#"{"expenses": [{"id": "1", "name": "Ok", "amount": 1, "date": "2024-01-10", "category": "Food"}], "budgets": "none"}"#,
        ] {
            let err = service.import_str(json).unwrap_err();
            assert!(matches!(err, ExpenseError::Import(_)));
            assert!(err.to_string().contains("Invalid file format"));
        }

        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_keys_are_optional() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir, "store");

        let result = ImportService::new(&storage)
            .import_str(r#"{"budgets": [{"id": "b1", "category": "Bills", "amount": 80}]}"#)
            .unwrap();
        assert_eq!(result.expenses, ImportSummary::default());
        assert_eq!(result.total_imported(), 1);
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_test_storage(&temp_dir, "store");

        let err = ImportService::new(&storage)
            .import_file(&temp_dir.path().join("nope.json"))
            .unwrap_err();
        assert!(matches!(err, ExpenseError::Import(_)));
    }
}
