//! Interactive expense entry
//!
//! Prompts for a single expense on any line-based input and output stream.
//! Values already supplied on the command line skip their prompt but go
//! through the same validation.

use std::io::{BufRead, Write};

use tracing::{debug, error};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::expense::validate_name;
use crate::models::{Category, Expense, Money};

/// Values supplied up front instead of being prompted for
#[derive(Debug, Clone, Default)]
pub struct ExpenseInput {
    pub name: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
}

/// Collects one validated expense from a prompt-driven session
pub struct ExpenseCollector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ExpenseCollector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prompt for every field
    pub fn collect(&mut self) -> ExpenseResult<Expense> {
        self.collect_with(ExpenseInput::default())
    }

    /// Prompt only for the fields missing from `preset`
    ///
    /// A non-numeric category answer fails; an out-of-range number re-prompts.
    pub fn collect_with(&mut self, preset: ExpenseInput) -> ExpenseResult<Expense> {
        if preset.name.is_none() || preset.amount.is_none() {
            writeln!(self.output, "How much did you spend?")?;
        }

        let name = match preset.name {
            Some(name) => name,
            None => self.prompt("Where did you spend: ", "an expense name")?,
        };
        validate_name(&name).map_err(|e| {
            error!("Invalid expense name: {}", e);
            ExpenseError::Validation(e.to_string())
        })?;

        let amount_text = match preset.amount {
            Some(amount) => amount,
            None => self.prompt("How much money was spent here: ", "an amount")?,
        };
        let amount = parse_amount(&amount_text)?;

        writeln!(
            self.output,
            "Expense name is {} and expense amount is {}",
            name, amount
        )?;

        let category = match preset.category {
            Some(text) => text.parse::<Category>().map_err(|e| {
                error!("Invalid category: {}", e);
                ExpenseError::Validation(e.to_string())
            })?,
            None => self.select_category()?,
        };
        writeln!(self.output, "Selected category: {}", category)?;

        let expense = Expense::new(name, amount, category);
        debug!(expense = %expense, "Collected expense");
        Ok(expense)
    }

    /// Show the category menu until a valid index is chosen
    fn select_category(&mut self) -> ExpenseResult<Category> {
        let categories = Category::all();

        loop {
            writeln!(self.output, "Select a category for this expense:")?;
            for (i, category) in categories.iter().enumerate() {
                writeln!(self.output, "  {}. {}", i + 1, category)?;
            }

            let prompt = format!("Please choose a category [1-{}]: ", categories.len());
            let answer = self.prompt(&prompt, "a category")?;

            let index: usize = answer.parse().map_err(|_| {
                error!(
                    "Invalid input for category selection. Expected a number between 1 and {}",
                    categories.len()
                );
                ExpenseError::Validation(format!(
                    "Invalid category selection '{}': expected a number between 1 and {}",
                    answer,
                    categories.len()
                ))
            })?;

            match Category::from_index(index) {
                Some(category) => return Ok(category),
                None => writeln!(self.output, "Invalid category! Please try again.")?,
            }
        }
    }

    /// Print a prompt and read one trimmed line
    fn prompt(&mut self, prompt: &str, what: &str) -> ExpenseResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ExpenseError::Validation(format!(
                "Input ended before {} was entered",
                what
            )));
        }

        Ok(line.trim().to_string())
    }
}

/// Parse a non-negative expense amount
pub fn parse_amount(text: &str) -> ExpenseResult<Money> {
    let amount = Money::parse(text).map_err(|e| {
        error!("Invalid amount: {}", e);
        ExpenseError::Validation(format!("Invalid amount: {}", e))
    })?;

    if amount.is_negative() {
        error!("Negative amount: {}", amount);
        return Err(ExpenseError::Validation(format!(
            "Amount cannot be negative: {}",
            amount
        )));
    }

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect_from(script: &str) -> (ExpenseResult<Expense>, String) {
        let mut output = Vec::new();
        let result = ExpenseCollector::new(Cursor::new(script.as_bytes()), &mut output).collect();
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_collect() {
        let (result, output) = collect_from("Coffee\n4.5\n1\n");
        let expense = result.unwrap();

        assert_eq!(expense.name, "Coffee");
        assert_eq!(expense.amount, Money::from_cents(450));
        assert_eq!(expense.category, Category::Food);
        assert!(output.contains("1. 🥙 Food"));
        assert!(output.contains("5. ✨Miscellaneous"));
        assert!(output.contains("Selected category: 🥙 Food"));
    }

    #[test]
    fn test_out_of_range_category_reprompts() {
        let (result, output) = collect_from("Rent\n800\n0\n9\n2\n");

        assert_eq!(result.unwrap().category, Category::Home);
        assert_eq!(output.matches("Invalid category! Please try again.").count(), 2);
        assert_eq!(output.matches("Select a category for this expense:").count(), 3);
    }

    #[test]
    fn test_non_numeric_category_fails() {
        let (result, _) = collect_from("Rent\n800\nhome\n");
        let err = result.unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains("'home'"));
    }

    #[test]
    fn test_non_numeric_amount_fails() {
        let (result, output) = collect_from("Lunch\nabc\n1\n");
        let err = result.unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains("Invalid amount"));
        assert!(!output.contains("Select a category"));
    }

    #[test]
    fn test_amount_keeps_every_decimal() {
        let (result, output) = collect_from("Fuel\n12.345\n3\n");

        assert_eq!(result.unwrap().amount, Money::parse("12.345").unwrap());
        assert!(output.contains("expense amount is 12.345"));
    }

    #[test]
    fn test_negative_amount_fails() {
        let (result, _) = collect_from("Refund\n-5\n1\n");
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_name_with_comma_fails() {
        let (result, _) = collect_from("Bar, downtown\n5\n4\n");
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_end_of_input_fails() {
        let (result, _) = collect_from("Lunch\n12\n7\n");
        let err = result.unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains("Input ended"));
    }

    #[test]
    fn test_preset_values_skip_prompts() {
        let mut output = Vec::new();
        let preset = ExpenseInput {
            name: Some("Taxi".into()),
            amount: Some("23.40".into()),
            category: Some("work".into()),
        };

        let expense = ExpenseCollector::new(std::io::empty(), &mut output)
            .collect_with(preset)
            .unwrap();

        assert_eq!(expense, Expense::new("Taxi", Money::from_cents(2340), Category::Work));
        let output = String::from_utf8(output).unwrap();
        assert!(!output.contains("Where did you spend"));
        assert!(!output.contains("Select a category"));
    }

    #[test]
    fn test_preset_unknown_category_fails() {
        let preset = ExpenseInput {
            name: Some("Taxi".into()),
            amount: Some("5".into()),
            category: Some("Travel".into()),
        };

        let err = ExpenseCollector::new(std::io::empty(), Vec::<u8>::new())
            .collect_with(preset)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_preset_category_only_prompts_for_rest() {
        let preset = ExpenseInput {
            category: Some("3".into()),
            ..ExpenseInput::default()
        };

        let input = Cursor::new("Printer ink\n39.99\n".as_bytes());
        let expense = ExpenseCollector::new(input, Vec::<u8>::new())
            .collect_with(preset)
            .unwrap();
        assert_eq!(expense.category, Category::Work);
        assert_eq!(expense.amount, Money::from_cents(3999));
    }
}
