//! Custom error types for the expense tracker
//!
//! A single umbrella error wraps the three failure families of the pipeline
//! (collection, storage, summarization) plus the ambient configuration and
//! I/O failures.

use thiserror::Error;

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Malformed user input during collection
    #[error("Validation error: {0}")]
    Validation(String),

    /// Failure to append to or read from the record store
    #[error("Storage error: {0}")]
    Storage(String),

    /// Degenerate aggregation conditions
    #[error("Summary error: {0}")]
    Summary(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File or console I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl ExpenseError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Check if this is a summary error
    pub fn is_summary(&self) -> bool {
        matches!(self, Self::Summary(_))
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExpenseError::Validation("amount is not a number".into());
        assert_eq!(err.to_string(), "Validation error: amount is not a number");

        let err = ExpenseError::Storage("line 3: expected 3 fields, found 2".into());
        assert_eq!(
            err.to_string(),
            "Storage error: line 3: expected 3 fields, found 2"
        );
    }

    #[test]
    fn test_kind_checks() {
        assert!(ExpenseError::Validation(String::new()).is_validation());
        assert!(ExpenseError::Storage(String::new()).is_storage());
        assert!(ExpenseError::Summary(String::new()).is_summary());
        assert!(!ExpenseError::Config(String::new()).is_storage());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExpenseError = io_err.into();
        assert!(matches!(err, ExpenseError::Io(_)));
    }
}
