use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use expense_cli::cli::{
    handle_ai_command, handle_budget_command, handle_config_command, handle_data_command,
    handle_expense_command, handle_history_command, handle_report_command,
};
use expense_cli::config::{ExpensePaths, Settings};
use expense_cli::storage::Storage;

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "EXPENSE_LOG";

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Terminal expense tracker with budgets and AI-assisted insights",
    long_about = "expense records your spending, tracks it against per-category \
                  budgets and can ask an AI backend for category suggestions, \
                  predictions and insights."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record, list and delete expenses
    #[command(subcommand, alias = "exp")]
    Expense(expense_cli::cli::ExpenseCommands),

    /// Manage per-category budgets
    #[command(subcommand)]
    Budget(expense_cli::cli::BudgetCommands),

    /// Spending summaries and analytics
    #[command(subcommand)]
    Report(expense_cli::cli::ReportCommands),

    /// Export and import JSON data files
    #[command(subcommand)]
    Data(expense_cli::cli::DataCommands),

    /// Ask the AI backend for suggestions and insights
    #[command(subcommand)]
    Ai(expense_cli::cli::AiCommands),

    /// Show or change configuration
    #[command(subcommand)]
    Config(expense_cli::cli::ConfigCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Data(cmd)) => handle_data_command(&storage, cmd)?,
        Some(Commands::Ai(cmd)) => handle_ai_command(&storage, &settings, cmd)?,
        Some(Commands::Config(cmd)) => handle_config_command(&paths, &mut settings, cmd)?,
        Some(Commands::History { limit }) => handle_history_command(&storage, limit)?,
        None => {
            println!("expense - terminal expense tracker");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense expense add <name> <amount> -c <category>' to record spending.");
        }
    }

    Ok(())
}
