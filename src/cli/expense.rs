//! Expense CLI commands
//!
//! Implements CLI commands for recording, listing and deleting expenses.

use std::io::{BufRead, Write};

use chrono::Local;
use clap::Subcommand;

use crate::ai::AiClient;
use crate::config::Settings;
use crate::display::expense::{format_expense_details, format_expense_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseId, Month};
use crate::services::expense::parse_positive_amount;
use crate::services::{CreateExpenseInput, ExpenseService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        name: String,
        /// Amount (e.g., "12.50" or "$1,200")
        amount: String,
        /// Category; asks the AI backend for a suggestion when omitted
        #[arg(short, long)]
        category: Option<String>,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Optional note
        #[arg(long)]
        description: Option<String>,
    },
    /// List expenses for a month
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<Month>,
        /// List every expense regardless of month
        #[arg(short, long, conflicts_with = "month")]
        all: bool,
    },
    /// Show expense details
    Show {
        /// Expense ID
        id: String,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            name,
            amount,
            category,
            date,
            description,
        } => {
            let category = match category {
                Some(category) => category,
                None => suggest_category(settings, &name, &amount)?,
            };
            let date = date.unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());

            let expense = service.add(CreateExpenseInput {
                name,
                amount,
                date,
                category,
                description,
            })?;

            println!(
                "Added expense: {} {} ({})",
                expense.name,
                expense.amount,
                expense.category.with_icon()
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List { month, all } => {
            if all {
                let expenses = service.list_all()?;
                println!("All expenses");
                println!("{}", format_expense_list(&expenses));
            } else {
                let month = month.unwrap_or_else(Month::current);
                let expenses = service.list_for_month(month)?;
                println!("Expenses for {}", month.long_name());
                println!("{}", format_expense_list(&expenses));
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = service
                .get(&ExpenseId::from(id.as_str()))?
                .ok_or_else(|| ExpenseError::expense_not_found(id))?;
            print!("{}", format_expense_details(&expense));
        }

        ExpenseCommands::Delete { id, yes } => {
            let id = ExpenseId::from(id.as_str());
            let Some(expense) = service.get(&id)? else {
                println!("No expense with ID {}. Nothing deleted.", id);
                return Ok(());
            };

            if !yes && !confirm(&format!("{}\nDelete this expense? [y/N] ", expense))? {
                println!("Aborted.");
                return Ok(());
            }

            if let Some(removed) = service.delete(&id)? {
                println!("Deleted expense: {} {}", removed.name, removed.amount);
            }
        }
    }

    Ok(())
}

/// Ask the AI backend which category an expense belongs to
fn suggest_category(settings: &Settings, name: &str, amount: &str) -> ExpenseResult<String> {
    if name.trim().is_empty() {
        return Err(ExpenseError::Validation("Expense name is required".into()));
    }
    let amount = parse_positive_amount(amount)?;

    let client = AiClient::from_settings(settings)?;
    let suggestion = client.categorize(name, amount).map_err(|e| match e {
        ExpenseError::Api(msg) => ExpenseError::Api(format!(
            "{} (pass --category to record the expense without the backend)",
            msg
        )),
        other => other,
    })?;

    let category = suggestion.category();
    println!("Using suggested category: {}", category.with_icon());
    Ok(category.label().to_string())
}

/// Print a prompt and read a yes/no answer from stdin
fn confirm(prompt: &str) -> ExpenseResult<bool> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
