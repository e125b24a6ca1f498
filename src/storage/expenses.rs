//! Expense repository backed by an append-only text file
//!
//! Each record is one line of the form `name,amount,category`, with no header
//! and no quoting. Records are only ever appended; reading always reloads the
//! whole file.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use tracing::{debug, info};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, Money};

/// Number of fields in every stored line
const FIELD_COUNT: usize = 3;

/// Repository for the append-only expense file
#[derive(Debug)]
pub struct ExpenseRepository {
    path: PathBuf,
}

impl ExpenseRepository {
    /// Create a repository reading and writing the given file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get the path to the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether anything has been appended yet
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Append one record as a new line, creating the file if needed
    pub fn append(&self, expense: &Expense) -> ExpenseResult<()> {
        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ExpenseError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                ExpenseError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .from_writer(file);

        let amount = expense.amount.to_string();
        writer
            .write_record([
                expense.name.as_str(),
                amount.as_str(),
                expense.category.label(),
            ])
            .map_err(|e| {
                ExpenseError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
            })?;

        writer.flush().map_err(|e| {
            ExpenseError::Storage(format!("Failed to flush {}: {}", self.path.display(), e))
        })?;

        info!(path = %self.path.display(), expense = %expense, "Saved expense");
        Ok(())
    }

    /// Read every stored record in file order
    ///
    /// A missing file yields an empty list. Any malformed line fails the whole
    /// load, including a blank one.
    pub fn load_all(&self) -> ExpenseResult<Vec<Expense>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Expense file not found, treating as empty");
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| {
            ExpenseError::Storage(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        // The csv reader drops empty lines silently, so find them up front
        let blank_line = contents.lines().position(str::is_empty).map(|i| i + 1);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(contents.as_bytes());

        let mut expenses = Vec::new();

        for result in reader.records() {
            // Without quoting every record is one line
            let line = expenses.len() + 1;
            if blank_line == Some(line) {
                break;
            }

            let record = result.map_err(|e| {
                ExpenseError::Storage(format!("Failed to read {}: {}", self.path.display(), e))
            })?;

            let expense = parse_record(&record).map_err(|reason| {
                ExpenseError::Storage(format!(
                    "{} line {}: {}",
                    self.path.display(),
                    line,
                    reason
                ))
            })?;

            debug!(line, expense = %expense, "Loaded expense");
            expenses.push(expense);
        }

        if let Some(line) = blank_line {
            return Err(ExpenseError::Storage(format!(
                "{} line {}: blank line, expected {} fields",
                self.path.display(),
                line,
                FIELD_COUNT
            )));
        }

        Ok(expenses)
    }
}

/// Rebuild an expense from one stored line
fn parse_record(record: &StringRecord) -> Result<Expense, String> {
    if record.len() != FIELD_COUNT {
        return Err(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            record.len()
        ));
    }

    let name = &record[0];

    let amount = Money::parse(&record[1]).map_err(|e| format!("invalid amount: {}", e))?;
    if amount.is_negative() {
        return Err(format!("negative amount: {}", amount));
    }

    let category = Category::from_label(&record[2])
        .ok_or_else(|| format!("unknown category '{}'", record[2].trim()))?;

    Ok(Expense::new(name, amount, category))
}
