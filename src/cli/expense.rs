//! CLI commands for recording and summarizing expenses

use std::io::{self, BufRead, Write};

use clap::Args;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::info;

use super::RunContext;
use crate::collector::{ExpenseCollector, ExpenseInput};
use crate::error::ExpenseResult;
use crate::models::{Category, Expense};
use crate::reports::ExpenseSummary;

/// Arguments for adding an expense; anything left out is prompted for
#[derive(Args, Debug, Clone, Default)]
pub struct AddArgs {
    /// Where the money was spent
    #[arg(short, long)]
    pub name: Option<String>,

    /// How much was spent (e.g., 12.50)
    #[arg(short, long)]
    pub amount: Option<String>,

    /// Category name, label or menu number (1-5)
    #[arg(short, long)]
    pub category: Option<String>,
}

impl From<AddArgs> for ExpenseInput {
    fn from(args: AddArgs) -> Self {
        Self {
            name: args.name,
            amount: args.amount,
            category: args.category,
        }
    }
}

/// Record one expense from the terminal, then print the summary
pub fn handle_add_command(ctx: &RunContext, args: AddArgs) -> ExpenseResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    add_expense(ctx, args, stdin.lock(), stdout.lock())
}

/// Collect, save, reload and summarize
///
/// Nothing is saved if collection fails, and no summary is printed if the
/// store cannot be read back.
pub fn add_expense<R: BufRead, W: Write>(
    ctx: &RunContext,
    args: AddArgs,
    input: R,
    mut output: W,
) -> ExpenseResult<()> {
    let expense = ExpenseCollector::new(input, &mut output).collect_with(args.into())?;

    ctx.repository.append(&expense)?;
    writeln!(output, "Saved: {}", expense)?;
    writeln!(output)?;

    write_summary(ctx, &mut output)
}

/// Print the summary of everything stored so far
pub fn handle_summary_command(ctx: &RunContext) -> ExpenseResult<()> {
    write_summary(ctx, &mut io::stdout().lock())
}

fn write_summary<W: Write>(ctx: &RunContext, output: &mut W) -> ExpenseResult<()> {
    let expenses = ctx.repository.load_all()?;
    let summary = ExpenseSummary::generate(&expenses, ctx.budget, ctx.today)?;

    info!(
        total = %summary.total_spent,
        remaining = %summary.remaining_budget,
        tier = %summary.tier,
        "Summary generated"
    );

    write!(output, "{}", summary.format_terminal(&ctx.currency_symbol))?;
    Ok(())
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
}

/// Print every stored expense as a table
pub fn handle_list_command(ctx: &RunContext) -> ExpenseResult<()> {
    let expenses = ctx.repository.load_all()?;

    if expenses.is_empty() {
        println!("No expenses recorded yet.");
        return Ok(());
    }

    println!("{}", format_expense_table(&expenses, &ctx.currency_symbol));
    Ok(())
}

fn format_expense_table(expenses: &[Expense], currency_symbol: &str) -> String {
    let rows = expenses.iter().enumerate().map(|(i, e)| ExpenseRow {
        index: i + 1,
        name: e.name.clone(),
        amount: e.amount.format_with_symbol(currency_symbol),
        category: e.category.label().to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Print the category menu
pub fn handle_categories_command() -> ExpenseResult<()> {
    for (i, category) in Category::all().iter().enumerate() {
        println!("{}. {}", i + 1, category);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::ExpenseRepository;
    use chrono::NaiveDate;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn create_test_context(temp_dir: &TempDir) -> RunContext {
        RunContext {
            repository: ExpenseRepository::new(temp_dir.path().join("expense.csv")),
            budget: Money::from_cents(100_000),
            today: NaiveDate::from_ymd_opt(2025, 1, 16).unwrap(),
            currency_symbol: "$".into(),
        }
    }

    #[test]
    fn test_add_expense_pipeline() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = create_test_context(&temp_dir);
        ctx.repository
            .append(&Expense::new("Lunch", Money::from_cents(1250), Category::Food))
            .unwrap();

        let mut output = Vec::new();
        add_expense(
            &ctx,
            AddArgs::default(),
            Cursor::new("Rent\n800\n2\n".as_bytes()),
            &mut output,
        )
        .unwrap();

        let stored = ctx.repository.load_all().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1], Expense::new("Rent", Money::from_cents(80000), Category::Home));

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Saved: Rent (800.00) in 🏡 Home"));
        assert!(output.contains("$812.50"));
        assert!(output.contains("Spending is rising. Be careful."));
    }

    #[test]
    fn test_failed_collection_saves_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = create_test_context(&temp_dir);

        let result = add_expense(
            &ctx,
            AddArgs::default(),
            Cursor::new("Lunch\nnot-a-number\n".as_bytes()),
            Vec::<u8>::new(),
        );

        assert!(result.unwrap_err().is_validation());
        assert!(!ctx.repository.exists());
    }

    #[test]
    fn test_corrupt_store_aborts_summary() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = create_test_context(&temp_dir);
        std::fs::write(ctx.repository.path(), "garbage line\n").unwrap();

        let args = AddArgs {
            name: Some("Tea".into()),
            amount: Some("2".into()),
            category: Some("food".into()),
        };
        let mut output = Vec::new();
        let err = add_expense(&ctx, args, std::io::empty(), &mut output).unwrap_err();

        assert!(err.is_storage());
        assert!(!String::from_utf8(output).unwrap().contains("Expense Summary"));
    }

    #[test]
    fn test_format_expense_table() {
        let expenses = vec![
            Expense::new("Lunch", Money::from_cents(1250), Category::Food),
            Expense::new("Rent", Money::from_cents(80000), Category::Home),
        ];

        let table = format_expense_table(&expenses, "$");
        assert!(table.contains("Name"));
        assert!(table.contains("Lunch"));
        assert!(table.contains("$800.00"));
        assert!(table.contains("🏡 Home"));
    }
}
