//! Report CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::report::{
    format_analytics, format_category_chart, format_monthly_breakdown, format_summary_cards,
    format_trend,
};
use crate::error::ExpenseResult;
use crate::models::Month;
use crate::reports::{monthly_breakdown, spending_trend, ExpenseAnalytics, SpendingReport};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Stat cards, category chart and month-over-month trend
    Summary {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<Month>,
    },
    /// Spending by category across all expenses
    Categories,
    /// Totals for the most recent months
    Monthly {
        /// Number of months to show (defaults to the recent-months setting)
        #[arg(short = 'n', long)]
        months: Option<usize>,
    },
    /// Totals, category breakdown and a six-month trend
    Analytics {
        /// Last month of the trend (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<Month>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    let expenses = storage.expenses.get_all()?;

    match cmd {
        ReportCommands::Summary { month } => {
            let month = month.unwrap_or_else(Month::current);
            let report = SpendingReport::from_expenses(&expenses, month);
            println!("{}", format_summary_cards(&report));
            println!("{}", format_category_chart(&report.categories));
            print!("{}", format_trend(&spending_trend(&expenses, month)));
        }

        ReportCommands::Categories => {
            let report = SpendingReport::from_expenses(&expenses, Month::current());
            print!("{}", format_category_chart(&report.categories));
        }

        ReportCommands::Monthly { months } => {
            let count = months.unwrap_or(settings.recent_months);
            print!("{}", format_monthly_breakdown(&monthly_breakdown(&expenses, count)));
        }

        ReportCommands::Analytics { month } => {
            let month = month.unwrap_or_else(Month::current);
            print!("{}", format_analytics(&ExpenseAnalytics::compute(&expenses, month)));
        }
    }

    Ok(())
}
