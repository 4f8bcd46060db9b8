//! Expense service
//!
//! Provides business logic for expense management: validated creation,
//! deletion, and month-filtered listing.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, ExpenseId, Money, MoneyParseError, Month};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Raw input for a new expense, as typed by the user
#[derive(Debug, Clone, Default)]
pub struct CreateExpenseInput {
    pub name: String,
    /// Amount in currency units, e.g. "12.50"
    pub amount: String,
    /// Date as `YYYY-MM-DD`
    pub date: String,
    pub category: String,
    pub description: Option<String>,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and store a new expense at the front of the list
    ///
    /// Nothing is written when validation fails.
    pub fn add(&self, input: CreateExpenseInput) -> ExpenseResult<Expense> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ExpenseError::Validation("Expense name is required".into()));
        }

        let amount = parse_positive_amount(&input.amount)?;

        let date = input.date.trim();
        if date.is_empty() {
            return Err(ExpenseError::Validation("Date is required".into()));
        }
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            ExpenseError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", date))
        })?;

        if input.category.trim().is_empty() {
            return Err(ExpenseError::Validation("Category is required".into()));
        }
        let category: Category = input
            .category
            .parse()
            .map_err(ExpenseError::Validation)?;

        let mut expense = Expense::new(name, amount, date, category);
        if let Some(description) = input.description {
            expense = expense.with_description(description.trim());
        }

        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.expenses.prepend(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.as_str(),
            Some(expense.name.clone()),
            &expense,
        )?;

        tracing::info!(id = %expense.id, amount = %expense.amount, "expense added");
        Ok(expense)
    }

    /// Delete an expense
    ///
    /// Returns `Ok(None)` when no expense has this id.
    pub fn delete(&self, id: &ExpenseId) -> ExpenseResult<Option<Expense>> {
        let Some(expense) = self.storage.expenses.delete(id)? else {
            tracing::debug!(%id, "delete requested for unknown expense");
            return Ok(None);
        };

        self.storage.expenses.save()?;
        self.storage.log_delete(
            EntityType::Expense,
            expense.id.as_str(),
            Some(expense.name.clone()),
            &expense,
        )?;

        tracing::info!(%id, "expense deleted");
        Ok(Some(expense))
    }

    /// Get an expense by ID
    pub fn get(&self, id: &ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Expenses dated within `month`, newest date first
    ///
    /// Same-day expenses keep their store order.
    pub fn list_for_month(&self, month: Month) -> ExpenseResult<Vec<Expense>> {
        let mut expenses = self.storage.expenses.get_by_month(month)?;
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }

    /// All expenses in store order
    pub fn list_all(&self) -> ExpenseResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        self.storage.expenses.count()
    }
}

/// Parse a user-entered amount that must be greater than zero
pub(crate) fn parse_positive_amount(raw: &str) -> ExpenseResult<Money> {
    let amount = Money::parse(raw).map_err(|e| match e {
        MoneyParseError::OutOfRange(_) => ExpenseError::Validation(e.to_string()),
        MoneyParseError::InvalidFormat(_) => ExpenseError::Validation(format!(
            "Amount must be a positive number (got '{}')",
            raw.trim()
        )),
    })?;
    if !amount.is_positive() {
        return Err(ExpenseError::Validation(format!(
            "Amount must be greater than zero (got {})",
            amount
        )));
    }
    Ok(amount)
}
