//! Reports module for the expense tracker
//!
//! Provides the budget summary computed over every stored expense.

pub mod summary;

pub use summary::{
    days_in_month, remaining_days_in_month, AdvisoryTier, ExpenseSummary, SummaryWarning,
};
