//! CLI command handlers
//!
//! This module bridges clap argument parsing with the collector, the record
//! store and the summary report.

pub mod config;
pub mod expense;

pub use config::{handle_config_command, ConfigArgs};
pub use expense::{
    add_expense, handle_add_command, handle_categories_command, handle_list_command,
    handle_summary_command, AddArgs,
};

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::config::{ExpensePaths, Settings};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Money;
use crate::storage::ExpenseRepository;

/// Per-run overrides given on the command line
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    /// Budget to use instead of the configured one
    pub budget: Option<String>,
    /// Record store to use instead of the configured one
    pub store: Option<PathBuf>,
    /// Date to project the daily budget from (YYYY-MM-DD)
    pub date: Option<String>,
}

/// Everything a command needs to run once
#[derive(Debug)]
pub struct RunContext {
    pub repository: ExpenseRepository,
    pub budget: Money,
    pub today: NaiveDate,
    pub currency_symbol: String,
}

impl RunContext {
    /// Combine settings with command-line overrides
    pub fn resolve(
        paths: &ExpensePaths,
        settings: &Settings,
        overrides: &RunOverrides,
    ) -> ExpenseResult<Self> {
        let budget = match &overrides.budget {
            Some(text) => Money::parse(text)
                .map_err(|e| ExpenseError::Validation(format!("Invalid budget: {}", e)))?,
            None => settings.budget,
        };

        let today = match &overrides.date {
            Some(text) => parse_date(text)?,
            None => chrono::Local::now().date_naive(),
        };

        let store_file = overrides
            .store
            .clone()
            .unwrap_or_else(|| settings.resolve_store_file(paths));

        Ok(Self {
            repository: ExpenseRepository::new(store_file),
            budget,
            today,
            currency_symbol: settings.currency_symbol.clone(),
        })
    }
}

/// Parse a YYYY-MM-DD date argument
pub fn parse_date(text: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
        ExpenseError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", text))
    })
}
