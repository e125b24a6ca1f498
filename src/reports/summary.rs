//! Budget summary report
//!
//! Aggregates every stored expense against a monthly budget: totals per
//! category, overall spend, what is left, how worried to be, and how much can
//! still be spent per day for the rest of the month.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{info, warn};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, Money};

/// Qualitative spend-health label derived from spend/budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AdvisoryTier {
    /// At most 70% of the budget spent
    UnderControl,
    /// More than 70%, at most 90%
    Rising,
    /// More than 90%, at most 100%
    VeryClose,
    /// More than 100%
    Exceeded,
}

impl AdvisoryTier {
    /// Classify total spend against a budget
    ///
    /// Thresholds are strict, so exactly 70%, 90% and 100% fall into the calmer
    /// tier. Both sides are exact decimals, so the boundaries are exact too.
    pub fn classify(total_spent: Money, budget: Money) -> Self {
        if budget.is_zero() {
            return if total_spent.is_positive() {
                Self::Exceeded
            } else {
                Self::UnderControl
            };
        }

        let spent = total_spent.as_decimal();
        let budget = budget.as_decimal();

        if spent > budget {
            Self::Exceeded
        } else if spent > budget * Decimal::new(9, 1) {
            Self::VeryClose
        } else if spent > budget * Decimal::new(7, 1) {
            Self::Rising
        } else {
            Self::UnderControl
        }
    }

    /// The advisory sentence shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Self::Exceeded => "Your expenses have exceeded the budget! Please be cautious.",
            Self::VeryClose => "You are very close to exceeding your budget.",
            Self::Rising => "Spending is rising. Be careful.",
            Self::UnderControl => "Budget is under control. Good job!",
        }
    }
}

impl fmt::Display for AdvisoryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Exceeded => "exceeded",
            Self::VeryClose => "very close",
            Self::Rising => "rising",
            Self::UnderControl => "under control",
        };
        f.pad(label)
    }
}

/// Conditions that were resolved to a defined value instead of failing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryWarning {
    /// Today is the last day of the month, so the daily budget is zero
    NoDaysRemaining,
    /// The budget is zero but money was spent, so no percentage exists
    ZeroBudget,
}

impl fmt::Display for SummaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDaysRemaining => write!(
                f,
                "No days remaining in this month to calculate a daily budget"
            ),
            Self::ZeroBudget => write!(f, "Budget is zero; spending percentage is undefined"),
        }
    }
}

/// Budget summary over every stored expense
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSummary {
    /// Date the projection was made for
    pub as_of: NaiveDate,
    /// Monthly budget
    pub budget: Money,
    /// Spend per category; categories without expenses are absent
    pub category_totals: BTreeMap<Category, Money>,
    /// Sum of all expense amounts
    pub total_spent: Money,
    /// Budget minus total spend (negative when over budget)
    pub remaining_budget: Money,
    /// Spend as a percentage of the budget, if defined
    pub percentage_spent: Option<f64>,
    /// Spend-health advisory
    pub tier: AdvisoryTier,
    /// Days left in the month after `as_of`
    pub remaining_days: u32,
    /// Remaining budget spread over the remaining days
    pub daily_budget: Money,
    /// Degenerate conditions that were resolved to zero
    pub warnings: Vec<SummaryWarning>,
    /// Number of expenses summarized
    pub expense_count: usize,
}

impl ExpenseSummary {
    /// Summarize expenses against a budget as of a given date
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::Summary` if the budget is negative or the
    /// amounts are too large to total.
    pub fn generate(expenses: &[Expense], budget: Money, today: NaiveDate) -> ExpenseResult<Self> {
        if budget.is_negative() {
            return Err(ExpenseError::Summary(format!(
                "Budget cannot be negative: {}",
                budget
            )));
        }

        info!(count = expenses.len(), %budget, %today, "Summarizing expenses");

        let overflow = || {
            ExpenseError::Summary(format!(
                "Total of {} expenses is too large to summarize",
                expenses.len()
            ))
        };

        let mut category_totals: BTreeMap<Category, Money> = BTreeMap::new();
        for expense in expenses {
            let total = category_totals.entry(expense.category).or_default();
            *total = total.checked_add(expense.amount).ok_or_else(overflow)?;
        }

        let total_spent =
            Money::checked_sum(expenses.iter().map(|e| e.amount)).ok_or_else(overflow)?;
        let remaining_budget = budget.checked_sub(total_spent).ok_or_else(overflow)?;
        let tier = AdvisoryTier::classify(total_spent, budget);
        let mut warnings = Vec::new();

        let percentage_spent = if !budget.is_zero() {
            Some(total_spent.as_f64() / budget.as_f64() * 100.0)
        } else if total_spent.is_zero() {
            Some(0.0)
        } else {
            warnings.push(SummaryWarning::ZeroBudget);
            None
        };

        let remaining_days = remaining_days_in_month(today);
        let daily_budget = if remaining_days > 0 {
            let per_day = remaining_budget.as_decimal() / Decimal::from(remaining_days);
            Money::from_decimal(
                per_day.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            )
        } else {
            warnings.push(SummaryWarning::NoDaysRemaining);
            Money::zero()
        };

        for warning in &warnings {
            warn!("{}", warning);
        }

        Ok(Self {
            as_of: today,
            budget,
            category_totals,
            total_spent,
            remaining_budget,
            percentage_spent,
            tier,
            remaining_days,
            daily_budget,
            warnings,
            expense_count: expenses.len(),
        })
    }

    /// Check if spending went over the budget
    pub fn is_over_budget(&self) -> bool {
        self.tier == AdvisoryTier::Exceeded
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency_symbol);
        let mut output = String::new();

        output.push_str(&format!("Expense Summary as of {}\n", self.as_of));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        output.push_str("Expenses by category:\n");
        if self.category_totals.is_empty() {
            output.push_str("  (no expenses recorded)\n");
        }
        for (category, amount) in &self.category_totals {
            output.push_str(&format!("  {:<20} {:>14}\n", category.label(), money(*amount)));
        }

        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!("Total spent:       {}\n", money(self.total_spent)));
        output.push_str(&format!(
            "Remaining budget:  {} of {}\n",
            money(self.remaining_budget),
            money(self.budget)
        ));
        if let Some(percentage) = self.percentage_spent {
            output.push_str(&format!("Budget used:       {:.2}%\n", percentage));
        }
        output.push('\n');
        output.push_str(self.tier.message());
        output.push('\n');
        output.push('\n');
        output.push_str(&format!(
            "Remaining days in this month: {}\n",
            self.remaining_days
        ));
        output.push_str(&format!(
            "Daily available budget:       {}\n",
            money(self.daily_budget)
        ));

        for warning in &self.warnings {
            output.push_str(&format!("Warning: {}\n", warning));
        }

        output
    }
}

/// Number of days in the month of `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or_else(|| date.day())
}

/// Days left in the month after `date` (zero on the last day)
pub fn remaining_days_in_month(date: NaiveDate) -> u32 {
    days_in_month(date).saturating_sub(date.day())
}
