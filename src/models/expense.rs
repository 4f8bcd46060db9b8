//! Expense model
//!
//! A single recorded spending event. Expenses are immutable once stored; the
//! only lifecycle operation after creation is deletion.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;
use super::period::Month;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// What the money was spent on
    pub name: String,

    /// Amount spent (always positive)
    pub amount: Money,

    /// Day of the expense, stored as `YYYY-MM-DD`
    pub date: NaiveDate,

    pub category: Category,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Expense {
    /// Create a new expense with a fresh id
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        category: Category,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            name: name.into(),
            amount,
            date,
            category,
            description: None,
        }
    }

    /// Attach a description; blank descriptions are dropped
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.trim().is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    /// The calendar month this expense belongs to
    pub fn month(&self) -> Month {
        Month::of(self.date)
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        if self.category.label().trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.name,
            self.amount,
            self.category
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
    NonPositiveAmount(Money),
    EmptyCategory,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::EmptyCategory => write!(f, "Category is required"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_expense() {
        let expense = Expense::new("Coffee", Money::from_cents(15_000), date(2024, 1, 15), Category::Food);
        assert_eq!(expense.name, "Coffee");
        assert_eq!(expense.month().to_string(), "2024-01");
        assert!(expense.description.is_none());
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut expense = Expense::new("  ", Money::from_cents(100), date(2024, 1, 1), Category::Food);
        assert_eq!(expense.validate(), Err(ExpenseValidationError::EmptyName));

        expense.name = "Lunch".into();
        expense.amount = Money::zero();
        assert!(matches!(
            expense.validate(),
            Err(ExpenseValidationError::NonPositiveAmount(_))
        ));

        expense.amount = Money::from_cents(100);
        expense.category = Category::Custom(String::new());
        assert_eq!(expense.validate(), Err(ExpenseValidationError::EmptyCategory));
    }

    #[test]
    fn test_json_shape() {
        let expense = Expense::new("Coffee", Money::from_cents(15_000), date(2024, 1, 15), Category::Food);
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["amount"], serde_json::json!(150));
        assert_eq!(json["date"], "2024-01-15");
        assert_eq!(json["category"], "Food");
        assert!(json.get("description").is_none());

        let with_desc = expense.with_description("morning");
        let json = serde_json::to_value(&with_desc).unwrap();
        assert_eq!(json["description"], "morning");
    }

    #[test]
    fn test_deserialize_foreign_record() {
        let json = r#"{"id":"1705312345678","name":"Bus","amount":2.75,"date":"2024-01-16","category":"Transportation","description":""}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.amount.cents(), 275);
        assert_eq!(expense.category, Category::Transportation);
        assert_eq!(expense.description.as_deref(), Some(""));
    }
}
