//! Budget model
//!
//! A spending ceiling for one category. At most one budget exists per
//! category.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::BudgetId;
use super::money::Money;
use super::period::BudgetPeriod;

/// A per-category spending limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// The category this budget limits
    pub category: Category,

    /// Spending limit per period
    pub amount: Money,

    #[serde(default)]
    pub period: BudgetPeriod,
}

impl Budget {
    /// Create a new monthly budget
    pub fn new(category: Category, amount: Money) -> Self {
        Self::with_period(category, amount, BudgetPeriod::Monthly)
    }

    /// Create a new budget with an explicit period
    pub fn with_period(category: Category, amount: Money, period: BudgetPeriod) -> Self {
        Self {
            id: BudgetId::new(),
            category,
            amount,
            period,
        }
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.category.label().trim().is_empty() {
            return Err(BudgetValidationError::EmptyCategory);
        }

        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.category, self.amount, self.period)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyCategory,
    NonPositiveAmount(Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "Category is required"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Budget amount must be greater than zero (got {})", amount)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
