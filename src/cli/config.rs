//! Configuration CLI commands

use clap::Subcommand;

use crate::config::settings::API_URL_ENV;
use crate::config::{ExpensePaths, Settings};
use crate::error::ExpenseResult;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show paths and settings
    Show,
    /// Change a setting
    Set {
        /// One of: api-url, timeout, alert-threshold, danger-threshold, recent-months
        key: String,
        value: String,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &ExpensePaths,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> ExpenseResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("expense-cli Configuration");
            println!("=========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  api-url:          {}", settings.api_base_url);
            if std::env::var(API_URL_ENV).is_ok() {
                println!(
                    "                    (overridden by {}: {})",
                    API_URL_ENV,
                    settings.effective_api_url()
                );
            }
            println!("  timeout:          {}s", settings.request_timeout_secs);
            println!("  alert-threshold:  {}%", settings.alert_threshold_percent);
            println!("  danger-threshold: {}%", settings.danger_threshold_percent);
            println!("  recent-months:    {}", settings.recent_months);
        }

        ConfigCommands::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(paths)?;
            tracing::info!(%key, %value, "setting updated");
            println!("Set {} = {}", key, value.trim());
        }
    }

    Ok(())
}
