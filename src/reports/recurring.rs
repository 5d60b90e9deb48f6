//! Recurring cost projector
//!
//! Normalizes mixed billing cadences to a monthly cost and lists the bills
//! that fall due in a given month.

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use super::write_csv_rows;
use crate::error::FinanceResult;
use crate::models::{DueMonth, Frequency, Money, RecurringExpense};

/// Totals for one billing cadence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyTotals {
    pub frequency: Frequency,
    pub count: usize,
    /// Sum of the billed amounts as entered
    pub native_total: Money,
    pub monthly_equivalent: Money,
}

/// A recurring expense with its normalized cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecurringItem {
    pub expense: RecurringExpense,
    pub monthly_equivalent: Money,
    pub annual_equivalent: Money,
}

/// The bills due in one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecurringDueList {
    pub month: DueMonth,
    pub items: Vec<RecurringExpense>,
    /// Sum of the billed amounts due this month
    pub total_due: Money,
}

impl RecurringDueList {
    /// Every Monthly and Weekly expense, plus anchored ones due in `month`
    pub fn for_month(expenses: &[RecurringExpense], month: DueMonth) -> Self {
        let items: Vec<RecurringExpense> = expenses
            .iter()
            .filter(|e| e.is_due_in(month))
            .cloned()
            .collect();
        let total_due = items.iter().map(|e| e.amount).sum();

        Self {
            month,
            items,
            total_due,
        }
    }

    pub fn vendors(&self) -> Vec<&str> {
        self.items.iter().map(|e| e.vendor.as_str()).collect()
    }
}

/// Normalized recurring costs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecurringReport {
    pub items: Vec<RecurringItem>,
    pub total_monthly_equivalent: Money,
    pub total_annual_equivalent: Money,
    /// Only cadences that have at least one expense, in [`Frequency::ALL`] order
    pub by_frequency: Vec<FrequencyTotals>,
    pub due_this_month: RecurringDueList,
}

impl RecurringReport {
    /// Project the costs, listing what falls due in `month`
    pub fn generate(expenses: &[RecurringExpense], month: DueMonth) -> Self {
        let items: Vec<RecurringItem> = expenses
            .iter()
            .map(|e| RecurringItem {
                expense: e.clone(),
                monthly_equivalent: e.monthly_equivalent(),
                annual_equivalent: e.annual_equivalent(),
            })
            .collect();

        let by_frequency = Frequency::ALL
            .into_iter()
            .filter_map(|frequency| {
                let matching: Vec<&RecurringItem> = items
                    .iter()
                    .filter(|i| i.expense.frequency == frequency)
                    .collect();
                (!matching.is_empty()).then(|| FrequencyTotals {
                    frequency,
                    count: matching.len(),
                    native_total: matching.iter().map(|i| i.expense.amount).sum(),
                    monthly_equivalent: matching.iter().map(|i| i.monthly_equivalent).sum(),
                })
            })
            .collect();

        let total_monthly_equivalent = total_monthly_equivalent(expenses);
        let total_annual_equivalent = items.iter().map(|i| i.annual_equivalent).sum();

        debug!(
            expenses = items.len(),
            monthly = %total_monthly_equivalent,
            "Generated recurring report"
        );

        Self {
            items,
            total_monthly_equivalent,
            total_annual_equivalent,
            by_frequency,
            due_this_month: RecurringDueList::for_month(expenses, month),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Recurring Costs\n");
        output.push_str(&"=".repeat(76));
        output.push('\n');
        output.push_str(&format!(
            "{:<22} {:<10} {:>12} {:<10} {:>16}\n",
            "Vendor", "Frequency", "Amount", "Due", "Monthly Equiv."
        ));
        output.push_str(&"-".repeat(76));
        output.push('\n');

        for item in &self.items {
            let due = item
                .expense
                .due_month
                .map(|m| m.name().to_string())
                .unwrap_or_else(|| "-".to_string());
            output.push_str(&format!(
                "{:<22} {:<10} {:>12} {:<10} {:>16}\n",
                item.expense.vendor,
                item.expense.frequency.as_str(),
                item.expense.amount.format_with_symbol(symbol),
                due,
                item.monthly_equivalent.format_with_symbol(symbol)
            ));
        }

        output.push_str(&"-".repeat(76));
        output.push('\n');
        output.push_str(&format!(
            "Total monthly equivalent: {}\n",
            self.total_monthly_equivalent.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Total annual equivalent:  {}\n",
            self.total_annual_equivalent.format_with_symbol(symbol)
        ));

        output.push_str(&format!(
            "\nDue in {} ({})\n",
            self.due_this_month.month,
            self.due_this_month.total_due.format_with_symbol(symbol)
        ));
        for expense in &self.due_this_month.items {
            output.push_str(&format!(
                "  {:<22} {:>12}\n",
                expense.vendor,
                expense.amount.format_with_symbol(symbol)
            ));
        }

        output
    }

    /// Export the normalized items to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FinanceResult<()> {
        let rows = self.items.iter().map(|item| ItemRow {
            vendor: &item.expense.vendor,
            frequency: item.expense.frequency.as_str(),
            amount: item.expense.amount.to_decimal_string(),
            due_month: item.expense.due_month.map(|m| m.number()),
            monthly_equivalent: item.monthly_equivalent.to_decimal_string(),
            annual_equivalent: item.annual_equivalent.to_decimal_string(),
        });
        write_csv_rows(
            writer,
            &[
                "Vendor",
                "Frequency",
                "Amount",
                "Due Month",
                "Monthly Equivalent",
                "Annual Equivalent",
            ],
            rows,
        )
    }
}

#[derive(Serialize)]
struct ItemRow<'a> {
    vendor: &'a str,
    frequency: &'static str,
    amount: String,
    due_month: Option<u8>,
    monthly_equivalent: String,
    annual_equivalent: String,
}

/// Sum of every expense normalized to a monthly cost
pub fn total_monthly_equivalent(expenses: &[RecurringExpense]) -> Money {
    expenses.iter().map(RecurringExpense::monthly_equivalent).sum()
}
