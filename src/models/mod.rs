//! Core data models for expense-cli
//!
//! This module contains the data structures of the expense-tracking domain:
//! expenses, budgets, categories, money amounts and calendar months.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;

pub use budget::{Budget, BudgetValidationError};
pub use category::Category;
pub use expense::{Expense, ExpenseValidationError};
pub use ids::{BudgetId, ExpenseId};
pub use money::{Money, MoneyParseError};
pub use period::{BudgetPeriod, Month};
