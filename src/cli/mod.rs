//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod ai;
pub mod budget;
pub mod config;
pub mod data;
pub mod expense;
pub mod history;
pub mod report;

pub use ai::{handle_ai_command, AiCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use data::{handle_data_command, DataCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use history::handle_history_command;
pub use report::{handle_report_command, ReportCommands};
