//! Reports module for expense-cli
//!
//! Pure aggregation over expenses and budgets: totals, category and monthly
//! breakdowns, budget utilization with alerts, and analytics.

pub mod analytics;
pub mod budget_status;
pub mod monthly;
pub mod spending;

pub use analytics::ExpenseAnalytics;
pub use budget_status::{
    budget_alerts, budget_utilization, AlertLevel, AlertThresholds, BudgetAlert, BudgetStatus,
    BudgetUtilization,
};
pub use monthly::{monthly_breakdown, spending_trend, MonthlySummary, SpendingTrend};
pub use spending::{
    category_totals, distinct_categories, monthly_total, top_category, total_expenses,
    CategoryTotal, SpendingReport,
};
