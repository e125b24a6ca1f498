//! CLI command for showing and changing settings

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::config::{ExpensePaths, Settings};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Money;

/// Arguments for the config command; with no flags it only prints
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Persist a new monthly budget (e.g., 2500.00)
    #[arg(long, value_name = "AMOUNT")]
    pub set_budget: Option<String>,

    /// Persist a new currency symbol for reports
    #[arg(long, value_name = "SYMBOL")]
    pub set_currency: Option<String>,

    /// Persist a different record store location
    #[arg(long, value_name = "PATH")]
    pub set_store: Option<PathBuf>,
}

impl ConfigArgs {
    fn has_changes(&self) -> bool {
        self.set_budget.is_some() || self.set_currency.is_some() || self.set_store.is_some()
    }
}

/// Apply requested changes, save them, and print the resulting configuration
pub fn handle_config_command(
    paths: &ExpensePaths,
    settings: &mut Settings,
    args: ConfigArgs,
) -> ExpenseResult<()> {
    if args.has_changes() {
        apply_changes(settings, &args)?;
        settings.save(paths)?;
        info!(budget = %settings.budget, "Settings saved");
        println!("Settings saved.");
        println!();
    }

    println!("Expense Tracker Configuration");
    println!("=============================");
    println!("Data directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Record store:   {}", settings.resolve_store_file(paths).display());
    println!("Log file:       {}", paths.log_file().display());
    println!();
    println!("Settings:");
    println!(
        "  Monthly budget:  {}",
        settings.budget.format_with_symbol(&settings.currency_symbol)
    );
    println!("  Currency symbol: {}", settings.currency_symbol);

    Ok(())
}

fn apply_changes(settings: &mut Settings, args: &ConfigArgs) -> ExpenseResult<()> {
    if let Some(text) = &args.set_budget {
        let budget = Money::parse(text)
            .map_err(|e| ExpenseError::Validation(format!("Invalid budget: {}", e)))?;
        if budget.is_negative() {
            return Err(ExpenseError::Validation(format!(
                "Budget cannot be negative: {}",
                budget
            )));
        }
        settings.budget = budget;
    }

    if let Some(symbol) = &args.set_currency {
        settings.currency_symbol = symbol.trim().to_string();
    }

    if let Some(store) = &args.set_store {
        settings.store_file = Some(store.clone());
    }

    Ok(())
}
