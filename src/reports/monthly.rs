//! Month-by-month aggregation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Expense, Money, Month};

use super::spending::monthly_total;

/// Totals for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: Month,
    pub total: Money,
    pub count: usize,
}

/// Per-month totals for the `limit` most recent months that have expenses,
/// newest first
pub fn monthly_breakdown(expenses: &[Expense], limit: usize) -> Vec<MonthlySummary> {
    let mut by_month: BTreeMap<Month, (Money, usize)> = BTreeMap::new();
    for expense in expenses {
        let entry = by_month
            .entry(expense.month())
            .or_insert((Money::zero(), 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    by_month
        .into_iter()
        .rev()
        .take(limit)
        .map(|(month, (total, count))| MonthlySummary {
            month,
            total,
            count,
        })
        .collect()
}

/// Change in spending from the previous month
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingTrend {
    pub month: Month,
    pub current: Money,
    pub previous: Money,
    /// current - previous
    pub change: Money,
    /// Change relative to the previous month; 0 when it had no spending
    pub change_percent: f64,
}

impl SpendingTrend {
    pub fn is_increase(&self) -> bool {
        self.change.is_positive()
    }
}

/// Compare `month` against the month before it
pub fn spending_trend(expenses: &[Expense], month: Month) -> SpendingTrend {
    let current = monthly_total(expenses, month);
    let previous = monthly_total(expenses, month.prev());
    let change = current - previous;
    let change_percent = if previous.is_positive() {
        change.cents() as f64 * 100.0 / previous.cents() as f64
    } else {
        0.0
    };

    SpendingTrend {
        month,
        current,
        previous,
        change,
        change_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::NaiveDate;

    fn expense(cents: i64, date: &str) -> Expense {
        Expense::new(
            "Item",
            Money::from_cents(cents),
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            Category::Other,
        )
    }

    #[test]
    fn test_breakdown_sorted_newest_first() {
        let expenses = vec![
            expense(100, "2023-11-05"),
            expense(200, "2024-01-10"),
            expense(300, "2024-01-20"),
            expense(400, "2023-12-31"),
        ];

        let breakdown = monthly_breakdown(&expenses, 6);
        let months: Vec<String> = breakdown.iter().map(|m| m.month.to_string()).collect();
        assert_eq!(months, vec!["2024-01", "2023-12", "2023-11"]);
        assert_eq!(breakdown[0].total.cents(), 500);
        assert_eq!(breakdown[0].count, 2);
    }

    #[test]
    fn test_breakdown_empty() {
        assert!(monthly_breakdown(&[], 6).is_empty());
    }

    #[test]
    fn test_breakdown_keeps_newest_months() {
        let mut expenses: Vec<Expense> = (1..=9)
            .map(|m| expense(m * 100, &format!("2023-{:02}-15", m)))
            .collect();
        expenses.push(expense(5_000, "2022-12-01"));

        let breakdown = monthly_breakdown(&expenses, 6);
        assert_eq!(breakdown.len(), 6);
        let months: Vec<String> = breakdown.iter().map(|m| m.month.to_string()).collect();
        assert_eq!(
            months,
            vec!["2023-09", "2023-08", "2023-07", "2023-06", "2023-05", "2023-04"]
        );
        assert_eq!(breakdown[5].total.cents(), 400);

        assert_eq!(monthly_breakdown(&expenses, 100).len(), 10);
        assert!(monthly_breakdown(&expenses, 0).is_empty());
    }

    #[test]
    fn test_spending_trend() {
        let expenses = vec![expense(10_000, "2024-01-10"), expense(15_000, "2024-02-03")];
        let trend = spending_trend(&expenses, "2024-02".parse().unwrap());
        assert_eq!(trend.change.cents(), 5_000);
        assert_eq!(trend.change_percent, 50.0);
        assert!(trend.is_increase());
    }

    #[test]
    fn test_spending_trend_without_previous_month() {
        let expenses = vec![expense(10_000, "2024-02-03")];
        let trend = spending_trend(&expenses, "2024-02".parse().unwrap());
        assert_eq!(trend.previous, Money::zero());
        assert_eq!(trend.change_percent, 0.0);
    }
}
