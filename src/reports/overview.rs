//! Dashboard overview
//!
//! The headline numbers for the month containing the reference date.

use chrono::NaiveDate;
use serde::Serialize;

use super::cash_flow::{CashFlowReport, MonthFill, MonthlySummary};
use super::receivables::ReceivablesReport;
use super::recurring::{total_monthly_equivalent, RecurringDueList};
use crate::models::{DueMonth, Money, Month, Period, RecordSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOverview {
    pub as_of: NaiveDate,
    pub month: MonthlySummary,
    pub total_outstanding: Money,
    pub count_overdue: usize,
    pub recurring_monthly_equivalent: Money,
    pub due_this_month: RecurringDueList,
}

impl DashboardOverview {
    pub fn generate(records: &RecordSet, today: NaiveDate) -> Self {
        let current = Month::of(today);
        let cash_flow = CashFlowReport::for_period(
            &records.transactions,
            &Period::Month(current),
            MonthFill::Sparse,
        );
        let month = cash_flow
            .get(current)
            .cloned()
            .unwrap_or_else(|| MonthlySummary::empty(current));

        let receivables = ReceivablesReport::generate(&records.invoices, today);

        Self {
            as_of: today,
            month,
            total_outstanding: receivables.total_outstanding,
            count_overdue: receivables.count_overdue,
            recurring_monthly_equivalent: total_monthly_equivalent(&records.recurring),
            due_this_month: RecurringDueList::for_month(&records.recurring, DueMonth::of(today)),
        }
    }

    /// Format the overview for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        let line = |label: &str, value: String| format!("{:<28} {:>16}\n", label, value);

        output.push_str(&format!("Business Overview: {}\n", self.month.period));
        output.push_str(&"=".repeat(45));
        output.push('\n');
        output.push_str(&line("Income", self.month.total_income.format_with_symbol(symbol)));
        output.push_str(&line(
            "Expenses",
            self.month.total_expense.format_with_symbol(symbol),
        ));
        output.push_str(&line("Profit", self.month.profit.format_with_symbol(symbol)));
        output.push_str(&line("Margin", format!("{:.1}%", self.month.margin_pct)));
        output.push('\n');
        output.push_str(&line(
            "Outstanding receivables",
            self.total_outstanding.format_with_symbol(symbol),
        ));
        output.push_str(&line("Overdue invoices", self.count_overdue.to_string()));
        output.push_str(&line(
            "Recurring (monthly equiv.)",
            self.recurring_monthly_equivalent.format_with_symbol(symbol),
        ));
        output.push_str(&line(
            &format!("Bills due in {}", self.due_this_month.month),
            self.due_this_month.total_due.format_with_symbol(symbol),
        ));

        output
    }
}
