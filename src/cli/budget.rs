//! Budget CLI commands
//!
//! Implements CLI commands for per-category budgets, their utilization and
//! alerts.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::budget::{
    format_alerts, format_available_categories, format_budget_details, format_budget_list,
};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Month;
use crate::services::{BudgetService, CreateBudgetInput};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set a budget for a category
    Add {
        /// Category name (e.g., "Food" or "personal care")
        category: String,
        /// Budget amount (e.g., "500" or "500.00")
        amount: String,
        /// Budget period (monthly, weekly, yearly)
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Show every budget with its utilization
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<Month>,
    },
    /// Show one budget
    Show {
        /// Budget ID or category
        budget: String,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<Month>,
    },
    /// Delete a budget
    Delete {
        /// Budget ID or category
        budget: String,
    },
    /// Show budgets at or over the alert threshold
    Alerts {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<Month>,
    },
    /// List categories that do not have a budget yet
    Available,
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> ExpenseResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Add {
            category,
            amount,
            period,
        } => {
            let budget = service.add(CreateBudgetInput {
                category,
                amount,
                period,
            })?;
            println!(
                "Set {} budget for {}: {}",
                budget.period,
                budget.category.with_icon(),
                budget.amount
            );
            println!("  ID: {}", budget.id);
        }

        BudgetCommands::List { month } => {
            let month = month.unwrap_or_else(Month::current);
            let utilizations = service.all_utilization(month)?;
            print!("{}", format_budget_list(&utilizations));
            if utilizations.is_empty() {
                println!();
            }
        }

        BudgetCommands::Show { budget, month } => {
            let month = month.unwrap_or_else(Month::current);
            let found = service
                .find(&budget)?
                .ok_or_else(|| ExpenseError::budget_not_found(budget))?;
            print!("{}", format_budget_details(&service.utilization(&found, month)?));
        }

        BudgetCommands::Delete { budget } => {
            let found = service
                .find(&budget)?
                .ok_or_else(|| ExpenseError::budget_not_found(budget))?;
            if service.delete(&found.id)? {
                println!("Deleted budget for {}", found.category.with_icon());
            }
        }

        BudgetCommands::Alerts { month } => {
            let month = month.unwrap_or_else(Month::current);
            let alerts = service.alerts(month, settings.alert_thresholds())?;
            println!("Budget alerts for {}", month.long_name());
            println!("{}", format_alerts(&alerts));
        }

        BudgetCommands::Available => {
            let categories = service.available_categories()?;
            println!("Categories without a budget:");
            print!("{}", format_available_categories(&categories));
        }
    }

    Ok(())
}
