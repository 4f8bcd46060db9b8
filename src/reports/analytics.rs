//! Expense analytics
//!
//! Same shape as the backend's `/expenses/analytics` response so the local
//! computation and the remote one render through the same code.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Expense, Money, Month};

use super::monthly::MonthlySummary;
use super::spending::{category_totals, total_expenses};

/// Months covered by the trend
pub const TREND_MONTHS: usize = 6;

/// Aggregate view of a set of expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseAnalytics {
    pub total_expenses: Money,
    /// Category label -> total
    pub category_breakdown: BTreeMap<String, Money>,
    /// Oldest month first
    pub monthly_trend: Vec<MonthlySummary>,
}

impl ExpenseAnalytics {
    /// Compute analytics with the trend ending at `month`
    ///
    /// Months without expenses appear in the trend with a zero total.
    pub fn compute(expenses: &[Expense], month: Month) -> Self {
        let category_breakdown = category_totals(expenses)
            .into_iter()
            .map(|t| (t.category.label().to_string(), t.total))
            .collect();

        let monthly_trend = month
            .trailing(TREND_MONTHS)
            .into_iter()
            .map(|m| {
                let in_month: Vec<&Expense> =
                    expenses.iter().filter(|e| m.contains(e.date)).collect();
                MonthlySummary {
                    month: m,
                    total: in_month.iter().map(|e| e.amount).sum(),
                    count: in_month.len(),
                }
            })
            .collect();

        Self {
            total_expenses: total_expenses(expenses),
            category_breakdown,
            monthly_trend,
        }
    }

    /// Breakdown entries sorted by amount, largest first
    pub fn sorted_breakdown(&self) -> Vec<(&str, Money)> {
        let mut entries: Vec<(&str, Money)> = self
            .category_breakdown
            .iter()
            .map(|(label, total)| (label.as_str(), *total))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}
