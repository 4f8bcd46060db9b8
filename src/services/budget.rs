//! Budget service
//!
//! Budget CRUD plus utilization and alert checks against stored expenses.

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Budget, BudgetId, BudgetPeriod, Category, Month};
use crate::reports::{budget_alerts, budget_utilization, AlertThresholds, BudgetAlert, BudgetUtilization};
use crate::storage::Storage;

use super::expense::parse_positive_amount;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Raw input for a new budget
#[derive(Debug, Clone, Default)]
pub struct CreateBudgetInput {
    pub category: String,
    pub amount: String,
    /// Defaults to monthly
    pub period: Option<String>,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and store a new budget
    ///
    /// Fails with a duplicate error if the category already has a budget.
    pub fn add(&self, input: CreateBudgetInput) -> ExpenseResult<Budget> {
        if input.category.trim().is_empty() {
            return Err(ExpenseError::Validation("Category is required".into()));
        }
        let category: Category = input
            .category
            .parse()
            .map_err(ExpenseError::Validation)?;

        let amount = parse_positive_amount(&input.amount)?;

        let period = match input.period.as_deref() {
            Some(raw) => raw.parse().map_err(ExpenseError::Validation)?,
            None => BudgetPeriod::default(),
        };

        if self.storage.budgets.get_by_category(&category)?.is_some() {
            return Err(ExpenseError::duplicate_budget(category.label()));
        }

        let budget = Budget::with_period(category, amount, period);
        budget
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.budgets.push(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_create(
            EntityType::Budget,
            budget.id.as_str(),
            Some(budget.category.label().to_string()),
            &budget,
        )?;

        tracing::info!(id = %budget.id, category = %budget.category, "budget added");
        Ok(budget)
    }

    /// Delete a budget; returns whether anything was removed
    pub fn delete(&self, id: &BudgetId) -> ExpenseResult<bool> {
        let Some(budget) = self.storage.budgets.delete(id)? else {
            return Ok(false);
        };

        self.storage.budgets.save()?;
        self.storage.log_delete(
            EntityType::Budget,
            budget.id.as_str(),
            Some(budget.category.label().to_string()),
            &budget,
        )?;

        tracing::info!(%id, "budget deleted");
        Ok(true)
    }

    /// Find a budget by id, or by category label
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Budget>> {
        if let Some(budget) = self.storage.budgets.get(&BudgetId::from(identifier.trim()))? {
            return Ok(Some(budget));
        }
        self.storage
            .budgets
            .get_by_category(&Category::from_label(identifier.trim()))
    }

    pub fn get(&self, id: &BudgetId) -> ExpenseResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    /// All budgets in creation order
    pub fn list(&self) -> ExpenseResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    /// Utilization of one budget for `month`
    pub fn utilization(&self, budget: &Budget, month: Month) -> ExpenseResult<BudgetUtilization> {
        let expenses = self.storage.expenses.get_by_month(month)?;
        Ok(budget_utilization(budget, &expenses, month))
    }

    /// Utilization of every budget for `month`
    pub fn all_utilization(&self, month: Month) -> ExpenseResult<Vec<BudgetUtilization>> {
        let expenses = self.storage.expenses.get_by_month(month)?;
        Ok(self
            .list()?
            .iter()
            .map(|budget| budget_utilization(budget, &expenses, month))
            .collect())
    }

    /// Budgets at or over the alert threshold for `month`
    pub fn alerts(&self, month: Month, thresholds: AlertThresholds) -> ExpenseResult<Vec<BudgetAlert>> {
        let expenses = self.storage.expenses.get_by_month(month)?;
        Ok(budget_alerts(&self.list()?, &expenses, month, thresholds))
    }

    /// Known categories that do not have a budget yet
    pub fn available_categories(&self) -> ExpenseResult<Vec<Category>> {
        let budgets = self.list()?;
        Ok(Category::ALL
            .iter()
            .filter(|c| !budgets.iter().any(|b| &b.category == *c))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::reports::{AlertLevel, BudgetStatus};
    use crate::services::{CreateExpenseInput, ExpenseService};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn budget_input(category: &str, amount: &str) -> CreateBudgetInput {
        CreateBudgetInput {
            category: category.into(),
            amount: amount.into(),
            period: None,
        }
    }

    fn add_expense(storage: &Storage, amount: &str, date: &str, category: &str) {
        ExpenseService::new(storage)
            .add(CreateExpenseInput {
                name: "Item".into(),
                amount: amount.into(),
                date: date.into(),
                category: category.into(),
                description: None,
            })
            .unwrap();
    }

    #[test]
    fn test_add_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let budget = service.add(budget_input("Food", "1000")).unwrap();
        assert_eq!(budget.category, Category::Food);
        assert_eq!(budget.period, BudgetPeriod::Monthly);
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service.add(budget_input("Food", "1000")).unwrap();
        let err = service.add(budget_input("food", "500")).unwrap_err();
        assert!(matches!(err, ExpenseError::Duplicate { .. }));
        assert_eq!(err.to_string(), "Budget already exists: Food");
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_budget_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        assert!(service.add(budget_input("", "100")).unwrap_err().is_validation());
        assert!(service.add(budget_input("Food", "0")).unwrap_err().is_validation());
        assert!(service.add(budget_input("Food", "-1")).unwrap_err().is_validation());

        let mut bad_period = budget_input("Food", "100");
        bad_period.period = Some("daily".into());
        assert!(service.add(bad_period).unwrap_err().is_validation());

        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_delete_and_find() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let budget = service.add(budget_input("Bills", "300")).unwrap();
        assert_eq!(service.find("bills").unwrap().map(|b| b.id), Some(budget.id.clone()));
        assert!(service.find(budget.id.as_str()).unwrap().is_some());

        assert!(service.delete(&budget.id).unwrap());
        assert!(!service.delete(&budget.id).unwrap());
        assert!(service.get(&budget.id).unwrap().is_none());
    }

    #[test]
    fn test_utilization_and_alert_scenario() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let month: Month = "2024-03".parse().unwrap();

        let food = service.add(budget_input("Food", "1000")).unwrap();
        add_expense(&storage, "600", "2024-03-02", "Food");
        add_expense(&storage, "250", "2024-03-09", "Food");
        add_expense(&storage, "400", "2024-02-28", "Food");

        let usage = service.utilization(&food, month).unwrap();
        assert_eq!(usage.spent.cents(), 85_000);
        assert_eq!(usage.status, BudgetStatus::Warning);

        let alerts = service.alerts(month, AlertThresholds::default()).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertLevel::Warning);
        assert_eq!(service.all_utilization(month).unwrap().len(), 1);
    }

    #[test]
    fn test_available_categories() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        assert_eq!(service.available_categories().unwrap().len(), 12);
        service.add(budget_input("Travel", "100")).unwrap();

        let available = service.available_categories().unwrap();
        assert_eq!(available.len(), 11);
        assert!(!available.contains(&Category::Travel));
    }
}
