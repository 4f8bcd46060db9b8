//! Expense display formatting
//!
//! Renders expense lists as `tabled` tables and single expenses as detail
//! blocks.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Expense, Money};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            date: expense.date.format("%Y-%m-%d").to_string(),
            name: expense.name.clone(),
            category: expense.category.with_icon(),
            amount: expense.amount.to_string(),
            description: expense.description.clone().unwrap_or_default(),
            id: expense.id.to_string(),
        }
    }
}

/// Format a list of expenses as a table with a total line
pub fn format_expense_list(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows: Vec<ExpenseRow> = expenses.iter().map(ExpenseRow::from).collect();
    let mut table = Table::new(rows);
    table
        .with(Style::sharp())
        .modify(Columns::single(3), Alignment::right());

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    format!(
        "{}\n{} expense(s), total {}\n",
        table,
        expenses.len(),
        total
    )
}

/// Format a single expense's details
pub fn format_expense_details(expense: &Expense) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.name));
    output.push_str(&format!("  ID:          {}\n", expense.id));
    output.push_str(&format!("  Amount:      {}\n", expense.amount));
    output.push_str(&format!("  Date:        {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!("  Category:    {}\n", expense.category.with_icon()));
    if let Some(description) = &expense.description {
        output.push_str(&format!("  Description: {}\n", description));
    }

    output
}
