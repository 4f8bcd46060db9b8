//! AI backend CLI commands
//!
//! Each command makes exactly one request. Failures are reported and never
//! touch stored data.

use clap::Subcommand;

use crate::ai::AiClient;
use crate::config::Settings;
use crate::display::budget::format_alerts;
use crate::display::insight::{format_health, format_insights, format_prediction, format_suggestion};
use crate::display::report::format_analytics;
use crate::error::ExpenseResult;
use crate::services::expense::parse_positive_amount;
use crate::storage::Storage;

/// AI subcommands
#[derive(Subcommand)]
pub enum AiCommands {
    /// Suggest a category for an expense
    Categorize {
        /// Expense name
        name: String,
        /// Amount
        amount: String,
    },
    /// Predict next month's spending
    Predict,
    /// Show spending insights
    Insights,
    /// Analytics computed by the backend
    Analytics,
    /// Budget alerts computed by the backend
    Alerts,
    /// Check that the backend is reachable
    Health,
}

/// Handle an AI command
pub fn handle_ai_command(storage: &Storage, settings: &Settings, cmd: AiCommands) -> ExpenseResult<()> {
    let client = AiClient::from_settings(settings)?;

    match cmd {
        AiCommands::Categorize { name, amount } => {
            let amount = parse_positive_amount(&amount)?;
            let suggestion = client.categorize(&name, amount)?;
            println!("{}", format_suggestion(&name, &suggestion));
        }

        AiCommands::Predict => {
            let expenses = storage.expenses.get_all()?;
            let prediction = client.predict(&expenses)?;
            print!("{}", format_prediction(&prediction));
        }

        AiCommands::Insights => {
            let expenses = storage.expenses.get_all()?;
            let insights = client.insights(&expenses)?;
            println!("{}", format_insights(&insights));
        }

        AiCommands::Analytics => {
            let expenses = storage.expenses.get_all()?;
            print!("{}", format_analytics(&client.analytics(&expenses)?));
        }

        AiCommands::Alerts => {
            let expenses = storage.expenses.get_all()?;
            let budgets = storage.budgets.get_all()?;
            let alerts = client.budget_alerts(&expenses, &budgets)?;
            println!("{}", format_alerts(&alerts));
        }

        AiCommands::Health => {
            let health = client.health()?;
            print!("{}", format_health(client.base_url(), &health));
        }
    }

    Ok(())
}
