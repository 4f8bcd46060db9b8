//! Budget utilization and alerts
//!
//! Utilization compares one month of spending in a budget's category against
//! the budget amount. Status bands and alert levels are pure functions of
//! the resulting percentage.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Budget, Category, Expense, Money, Month};

/// Health of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// Below 60%
    Good,
    /// 60% up to 80%
    Caution,
    /// 80% up to 100%
    Warning,
    /// 100% or more
    Danger,
}

impl BudgetStatus {
    /// Classify a utilization percentage
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            Self::Danger
        } else if percentage >= 80.0 {
            Self::Warning
        } else if percentage >= 60.0 {
            Self::Caution
        } else {
            Self::Good
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Good => "Within budget",
            Self::Caution => "Approaching budget limit",
            Self::Warning => "Close to budget limit",
            Self::Danger => "Budget exceeded!",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Caution => write!(f, "caution"),
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

/// A budget with its spending for one month
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetUtilization {
    pub budget: Budget,
    pub month: Month,
    pub spent: Money,
    pub percentage: f64,
    pub status: BudgetStatus,
}

impl BudgetUtilization {
    /// Budget amount minus spending; negative when over budget
    pub fn remaining(&self) -> Money {
        self.budget.amount - self.spent
    }

    pub fn is_over(&self) -> bool {
        self.remaining().is_negative()
    }
}

/// Spending in `category` dated within `month`
pub fn category_spent(expenses: &[Expense], category: &Category, month: Month) -> Money {
    expenses
        .iter()
        .filter(|e| e.category.same_as(category) && month.contains(e.date))
        .map(|e| e.amount)
        .sum()
}

/// Compute a budget's utilization for a month
///
/// A budget amount of zero or less yields 0%.
pub fn budget_utilization(budget: &Budget, expenses: &[Expense], month: Month) -> BudgetUtilization {
    let spent = category_spent(expenses, &budget.category, month);
    let percentage = spent.percent_of(budget.amount);

    BudgetUtilization {
        budget: budget.clone(),
        month,
        spent,
        percentage,
        status: BudgetStatus::from_percentage(percentage),
    }
}

/// Severity of a budget alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Warning,
    Danger,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

/// A budget that has crossed the alert threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub category: Category,
    pub budget_amount: Money,
    pub spent_amount: Money,
    pub percentage_used: f64,
    pub alert_type: AlertLevel,
}

/// Percentages at which alerts are raised and escalated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertThresholds {
    pub alert: f64,
    pub danger: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            alert: 75.0,
            danger: 90.0,
        }
    }
}

impl AlertThresholds {
    /// Alert level for a percentage, or `None` below the alert threshold
    pub fn level(&self, percentage: f64) -> Option<AlertLevel> {
        if percentage >= self.danger {
            Some(AlertLevel::Danger)
        } else if percentage >= self.alert {
            Some(AlertLevel::Warning)
        } else {
            None
        }
    }
}

/// Alerts for every budget over the threshold in `month`, in budget order
pub fn budget_alerts(
    budgets: &[Budget],
    expenses: &[Expense],
    month: Month,
    thresholds: AlertThresholds,
) -> Vec<BudgetAlert> {
    budgets
        .iter()
        .map(|budget| budget_utilization(budget, expenses, month))
        .filter_map(|usage| {
            thresholds.level(usage.percentage).map(|level| BudgetAlert {
                category: usage.budget.category.clone(),
                budget_amount: usage.budget.amount,
                spent_amount: usage.spent,
                percentage_used: usage.percentage,
                alert_type: level,
            })
        })
        .collect()
}
