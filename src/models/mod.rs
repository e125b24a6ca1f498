//! Core data models for the expense tracker
//!
//! This module contains the expense record, its fixed category set and the
//! exact money type used for amounts and budgets.

pub mod category;
pub mod expense;
pub mod money;

pub use category::{Category, UnknownCategory};
pub use expense::{Expense, ExpenseValidationError};
pub use money::{Money, MoneyParseError};
