//! Report formatting for terminal output
//!
//! Stat cards, a text bar chart of category shares, the monthly breakdown
//! and the analytics view.

use crate::models::Money;
use crate::reports::{CategoryTotal, ExpenseAnalytics, MonthlySummary, SpendingReport, SpendingTrend};

const CHART_WIDTH: usize = 30;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// The dashboard stat cards
pub fn format_summary_cards(report: &SpendingReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("Spending Summary ({})\n", report.month.long_name()));
    output.push_str(&format!("{}\n", separator(48)));
    output.push_str(&format!("  Total Spending:   {:>14}\n", report.total_spending.to_string()));
    output.push_str(&format!("  This Month:       {:>14}\n", report.month_spending.to_string()));
    output.push_str(&format!("  Transactions:     {:>14}\n", report.expense_count));
    output.push_str(&format!("  Categories:       {:>14}\n", report.category_count));
    match &report.top_category {
        Some(top) => output.push_str(&format!(
            "  Top Category:     {} ({})\n",
            top.category.with_icon(),
            top.total
        )),
        None => output.push_str("  Top Category:     None\n"),
    }
    output
}

/// Category shares drawn as horizontal bars, largest first
pub fn format_category_chart(categories: &[CategoryTotal]) -> String {
    if categories.is_empty() {
        return "No spending recorded yet.\n".to_string();
    }

    let label_width = categories
        .iter()
        .map(|c| c.category.with_icon().chars().count())
        .max()
        .unwrap_or(8);
    let max = categories
        .iter()
        .map(|c| c.total.as_f64())
        .fold(0.0_f64, f64::max);

    let mut output = String::from("Spending by Category\n");
    output.push_str(&format!("{}\n", separator(label_width + CHART_WIDTH + 28)));
    for entry in categories {
        output.push_str(&format!(
            "  {:<label_width$}  {}  {:>12}  {:>5}\n",
            entry.category.with_icon(),
            format_bar(entry.total.as_f64(), max, CHART_WIDTH),
            entry.total.to_string(),
            format_percentage(entry.percentage),
            label_width = label_width,
        ));
    }
    output
}

/// Newest-first monthly totals
pub fn format_monthly_breakdown(summaries: &[MonthlySummary]) -> String {
    if summaries.is_empty() {
        return "No monthly data yet.\n".to_string();
    }

    let mut output = String::from("Monthly Breakdown\n");
    output.push_str(&format!("{}\n", separator(48)));
    for summary in summaries {
        output.push_str(&format!(
            "  {:<16} {:>14}  {:>3} expense(s)\n",
            summary.month.long_name(),
            summary.total.to_string(),
            summary.count
        ));
    }
    output
}

/// Month-over-month change
pub fn format_trend(trend: &SpendingTrend) -> String {
    let direction = if trend.change.is_zero() {
        "no change"
    } else if trend.is_increase() {
        "up"
    } else {
        "down"
    };

    format!(
        "{}: {} vs {} last month ({} {}, {}{:.1}%)\n",
        trend.month.long_name(),
        trend.current,
        trend.previous,
        direction,
        trend.change.abs(),
        if trend.change_percent > 0.0 { "+" } else { "" },
        trend.change_percent
    )
}

/// Analytics view: totals, category breakdown and the trend table
pub fn format_analytics(analytics: &ExpenseAnalytics) -> String {
    let mut output = String::new();
    output.push_str(&format!("Total Expenses: {}\n\n", analytics.total_expenses));

    output.push_str("Category Breakdown\n");
    output.push_str(&format!("{}\n", separator(40)));
    let breakdown = analytics.sorted_breakdown();
    if breakdown.is_empty() {
        output.push_str("  (none)\n");
    }
    for (label, amount) in breakdown {
        output.push_str(&format!("  {:<20} {:>14}\n", label, amount.to_string()));
    }

    output.push_str("\nMonthly Trend\n");
    output.push_str(&format!("{}\n", separator(40)));
    let max = analytics
        .monthly_trend
        .iter()
        .map(|m| m.total)
        .max()
        .unwrap_or_else(Money::zero);
    for point in &analytics.monthly_trend {
        output.push_str(&format!(
            "  {}  {}  {:>12}\n",
            point.month,
            format_bar(point.total.as_f64(), max.as_f64(), 20),
            point.total.to_string()
        ));
    }
    output
}
