//! CLI commands for data export and import

use std::path::PathBuf;

use clap::Subcommand;

use crate::error::ExpenseResult;
use crate::export::export_to_file;
use crate::services::ImportService;
use crate::storage::Storage;

/// Data subcommands
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Export expenses and budgets to a JSON file
    Export {
        /// Output file path (defaults to expense-data-YYYY-MM-DD.json)
        output: Option<PathBuf>,
    },
    /// Merge a previously exported JSON file into the store
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },
}

/// Handle a data command
pub fn handle_data_command(storage: &Storage, cmd: DataCommands) -> ExpenseResult<()> {
    match cmd {
        DataCommands::Export { output } => {
            let (path, export) = export_to_file(storage, output.as_deref())?;
            println!(
                "Exported {} expense(s) and {} budget(s) to {}",
                export.expenses.len(),
                export.budgets.len(),
                path.display()
            );
        }

        DataCommands::Import { file } => {
            let result = ImportService::new(storage).import_file(&file)?;
            println!("Import from {}", file.display());
            println!("  Expenses: {}", result.expenses);
            println!("  Budgets:  {}", result.budgets);
            if result.total_imported() == 0 {
                println!("Nothing new to import.");
            }
        }
    }

    Ok(())
}
