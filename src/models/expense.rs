//! Expense record model
//!
//! An expense is a single (name, amount, category) spend event. Records are
//! created once, appended to the store, and never modified afterwards.

use std::fmt;

use super::category::Category;
use super::money::Money;

/// A single spend event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    /// Where the money was spent
    pub name: String,

    /// How much was spent (never negative)
    pub amount: Money,

    /// Which fixed category the spend belongs to
    pub category: Category,
}

impl Expense {
    /// Create a new expense
    pub fn new(name: impl Into<String>, amount: Money, category: Category) -> Self {
        Self {
            name: name.into(),
            amount,
            category,
        }
    }

    /// Validate the record against the store's serialization contract
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_name(&self.name)?;

        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount);
        }

        Ok(())
    }
}

/// Check that a name can be stored as a single unescaped field
pub fn validate_name(name: &str) -> Result<(), ExpenseValidationError> {
    if name.trim().is_empty() {
        return Err(ExpenseValidationError::EmptyName);
    }

    if let Some(c) = name.chars().find(|c| matches!(c, ',' | '\n' | '\r')) {
        return Err(ExpenseValidationError::ForbiddenCharacter(c));
    }

    Ok(())
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) in {}", self.name, self.amount, self.category)
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
    ForbiddenCharacter(char),
    NegativeAmount,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
            Self::ForbiddenCharacter(c) => {
                write!(f, "Expense name cannot contain {:?}", c)
            }
            Self::NegativeAmount => write!(f, "Expense amount cannot be negative"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
