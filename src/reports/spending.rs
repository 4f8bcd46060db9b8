//! Spending Report
//!
//! Totals and per-category breakdowns over a set of expenses, plus the
//! dashboard summary built from them.

use std::collections::HashMap;

use crate::error::ExpenseResult;
use crate::models::{Category, Expense, Money, Month};
use crate::storage::Storage;

/// Spending for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    /// Sum of amounts in this category
    pub total: Money,
    /// Number of expenses
    pub count: usize,
    /// Share of the grand total (%)
    pub percentage: f64,
}

/// Sum of all expense amounts
pub fn total_expenses(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

/// Sum of the amounts dated within `month`
pub fn monthly_total(expenses: &[Expense], month: Month) -> Money {
    expenses
        .iter()
        .filter(|e| month.contains(e.date))
        .map(|e| e.amount)
        .sum()
}

/// Per-category totals, largest first
///
/// Categories with equal totals keep the order in which they first appear in
/// `expenses`.
pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut index: HashMap<&Category, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        let slot = *index.entry(&expense.category).or_insert_with(|| {
            totals.push(CategoryTotal {
                category: expense.category.clone(),
                total: Money::zero(),
                count: 0,
                percentage: 0.0,
            });
            totals.len() - 1
        });
        totals[slot].total += expense.amount;
        totals[slot].count += 1;
    }

    let grand_total = total_expenses(expenses);
    for entry in &mut totals {
        entry.percentage = entry.total.percent_of(grand_total);
    }

    // sort_by is stable, so ties stay in first-seen order
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// The category with the highest total
pub fn top_category(expenses: &[Expense]) -> Option<CategoryTotal> {
    category_totals(expenses).into_iter().next()
}

/// Number of distinct category labels in use
pub fn distinct_categories(expenses: &[Expense]) -> usize {
    expenses
        .iter()
        .map(|e| &e.category)
        .collect::<std::collections::HashSet<_>>()
        .len()
}

/// Dashboard summary
#[derive(Debug, Clone)]
pub struct SpendingReport {
    /// The month treated as "this month"
    pub month: Month,
    /// Total over every stored expense
    pub total_spending: Money,
    /// Total within `month`
    pub month_spending: Money,
    pub expense_count: usize,
    pub category_count: usize,
    pub top_category: Option<CategoryTotal>,
    /// Breakdown over every stored expense
    pub categories: Vec<CategoryTotal>,
}

impl SpendingReport {
    /// Generate the summary from stored expenses
    pub fn generate(storage: &Storage, month: Month) -> ExpenseResult<Self> {
        let expenses = storage.expenses.get_all()?;
        Ok(Self::from_expenses(&expenses, month))
    }

    pub fn from_expenses(expenses: &[Expense], month: Month) -> Self {
        let categories = category_totals(expenses);
        Self {
            month,
            total_spending: total_expenses(expenses),
            month_spending: monthly_total(expenses, month),
            expense_count: expenses.len(),
            category_count: categories.len(),
            top_category: categories.first().cloned(),
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(name: &str, cents: i64, date: &str, category: Category) -> Expense {
        Expense::new(
            name,
            Money::from_cents(cents),
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            category,
        )
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense("Coffee", 15_000, "2024-01-15", Category::Food),
            expense("Bus", 5_000, "2024-01-16", Category::Transportation),
            expense("Rent", 100_000, "2023-12-01", Category::Housing),
            expense("Dinner", 5_000, "2024-01-20", Category::Food),
        ]
    }

    #[test]
    fn test_total_expenses() {
        assert_eq!(total_expenses(&sample()).cents(), 125_000);
        assert_eq!(total_expenses(&[]), Money::zero());
    }

    #[test]
    fn test_monthly_total() {
        let jan: Month = "2024-01".parse().unwrap();
        assert_eq!(monthly_total(&sample(), jan).cents(), 25_000);

        let coffee = vec![expense("Coffee", 15_000, "2024-01-15", Category::Food)];
        assert_eq!(monthly_total(&coffee, jan).to_string(), "$150.00");
    }

    #[test]
    fn test_category_totals_sum_to_total() {
        let expenses = sample();
        let totals = category_totals(&expenses);
        let sum: Money = totals.iter().map(|t| t.total).sum();
        assert_eq!(sum, total_expenses(&expenses));

        assert_eq!(totals[0].category, Category::Housing);
        assert_eq!(totals[1].category, Category::Food);
        assert_eq!(totals[1].count, 2);
        assert_eq!(totals[1].percentage, 16.0);
    }

    #[test]
    fn test_category_ties_keep_first_seen_order() {
        let expenses = vec![
            expense("Bus", 1_000, "2024-01-01", Category::Transportation),
            expense("Movie", 1_000, "2024-01-02", Category::Entertainment),
            expense("Pills", 1_000, "2024-01-03", Category::Health),
        ];
        let order: Vec<Category> = category_totals(&expenses)
            .into_iter()
            .map(|t| t.category)
            .collect();
        assert_eq!(
            order,
            vec![Category::Transportation, Category::Entertainment, Category::Health]
        );
    }

    #[test]
    fn test_top_and_distinct() {
        let expenses = sample();
        assert_eq!(top_category(&expenses).unwrap().category, Category::Housing);
        assert_eq!(distinct_categories(&expenses), 3);
        assert!(top_category(&[]).is_none());
    }

    #[test]
    fn test_report_from_expenses() {
        let report = SpendingReport::from_expenses(&sample(), "2024-01".parse().unwrap());
        assert_eq!(report.month_spending.cents(), 25_000);
        assert_eq!(report.expense_count, 4);
        assert_eq!(report.category_count, 3);
    }
}
