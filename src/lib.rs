//! Expense Tracker - terminal-based personal expense tracking
//!
//! Records one expense at a time into an append-only text file and reports
//! how the month's spending compares with a budget.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Expense, category and money types
//! - `collector`: Interactive entry of a single expense
//! - `storage`: Append-only expense file
//! - `reports`: Budget summary over all stored expenses
//! - `logging`: Console and log file setup
//! - `cli`: Command handlers for the `expense` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::reports::ExpenseSummary;
//! use expense_tracker::storage::ExpenseRepository;
//!
//! let repository = ExpenseRepository::new(paths.store_file());
//! let expenses = repository.load_all()?;
//! let summary = ExpenseSummary::generate(&expenses, settings.budget, today)?;
//! println!("{}", summary.format_terminal("$"));
//! ```

pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
