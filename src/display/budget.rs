//! Budget display formatting

use crate::models::Category;
use crate::reports::{BudgetAlert, BudgetStatus, BudgetUtilization};

use super::report::{format_bar, format_percentage};

const BAR_WIDTH: usize = 20;

/// "X remaining" while under budget, "X over" once exceeded
pub fn format_remaining(utilization: &BudgetUtilization) -> String {
    let remaining = utilization.remaining();
    if remaining.is_negative() {
        format!("{} over", remaining.abs())
    } else {
        format!("{} remaining", remaining)
    }
}

fn status_marker(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::Good => "✓",
        BudgetStatus::Caution => "•",
        BudgetStatus::Warning => "!",
        BudgetStatus::Danger => "⚠",
    }
}

/// Format budget utilization for a month
pub fn format_budget_list(utilizations: &[BudgetUtilization]) -> String {
    if utilizations.is_empty() {
        return "No budgets set. Use 'expense budget add' to create one.".to_string();
    }

    let name_width = utilizations
        .iter()
        .map(|u| u.budget.category.with_icon().chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!("Budgets for {}\n", utilizations[0].month.long_name()));
    output.push_str(&format!("{}\n", "=".repeat(name_width + 60)));

    for u in utilizations {
        output.push_str(&format!(
            "{} {:<name_width$}  {:>12} / {:<12} {} {:>5}\n",
            status_marker(u.status),
            u.budget.category.with_icon(),
            u.spent.to_string(),
            u.budget.amount.to_string(),
            format_bar(u.percentage.min(100.0), 100.0, BAR_WIDTH),
            format_percentage(u.percentage),
            name_width = name_width,
        ));
        output.push_str(&format!(
            "  {:<name_width$}  {} · {} ({})\n",
            "",
            u.status.message(),
            format_remaining(u),
            u.budget.period,
            name_width = name_width,
        ));
    }

    output
}

/// Format a single budget's utilization
pub fn format_budget_details(utilization: &BudgetUtilization) -> String {
    let budget = &utilization.budget;
    let mut output = String::new();

    output.push_str(&format!("Budget: {}\n", budget.category.with_icon()));
    output.push_str(&format!("  ID:       {}\n", budget.id));
    output.push_str(&format!("  Amount:   {} ({})\n", budget.amount, budget.period));
    output.push_str(&format!(
        "  Spent:    {} in {}\n",
        utilization.spent,
        utilization.month.long_name()
    ));
    output.push_str(&format!(
        "  Used:     {} {}\n",
        format_bar(utilization.percentage.min(100.0), 100.0, BAR_WIDTH),
        format_percentage(utilization.percentage)
    ));
    output.push_str(&format!(
        "  Status:   {} ({})\n",
        utilization.status.message(),
        format_remaining(utilization)
    ));

    output
}

/// Format budget alerts, or a reassuring line when there are none
pub fn format_alerts(alerts: &[BudgetAlert]) -> String {
    if alerts.is_empty() {
        return "No budget alerts. All categories are under the alert threshold.".to_string();
    }

    let mut output = String::new();
    for alert in alerts {
        let marker = match alert.alert_type {
            crate::reports::AlertLevel::Danger => "⚠ DANGER ",
            crate::reports::AlertLevel::Warning => "! WARNING",
        };
        output.push_str(&format!(
            "{}  {}: {} of {} spent ({})\n",
            marker,
            alert.category.with_icon(),
            alert.spent_amount,
            alert.budget_amount,
            format_percentage(alert.percentage_used)
        ));
    }
    output
}

/// Format the categories that can still receive a budget
pub fn format_available_categories(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "Every category already has a budget.".to_string();
    }
    categories
        .iter()
        .map(|c| format!("  {}\n", c.with_icon()))
        .collect()
}
