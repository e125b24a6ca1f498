//! Storage layer for the expense tracker
//!
//! Expenses live in a single append-only text file, one record per line.

pub mod expenses;

pub use expenses::ExpenseRepository;
