//! Display formatting for terminal output
//!
//! Turns models and report results into plain text: tables, bar charts and
//! status lines.

pub mod budget;
pub mod expense;
pub mod insight;
pub mod report;

pub use budget::{format_alerts, format_budget_details, format_budget_list, format_remaining};
pub use expense::{format_expense_details, format_expense_list};
pub use insight::{format_insights, format_prediction};
pub use report::{format_analytics, format_category_chart, format_monthly_breakdown, format_summary_cards};
