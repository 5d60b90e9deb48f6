//! Cash flow report
//!
//! Rolls transactions up by calendar month into income, expense, profit and
//! margin.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;
use tracing::debug;

use super::write_csv_rows;
use crate::error::FinanceResult;
use crate::models::{Money, Month, Period, Transaction, TransactionType};

/// How months without transactions are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFill {
    /// Only months that have transactions
    #[default]
    Sparse,
    /// Every month from the first to the last transaction, gaps zero-filled
    Continuous,
    /// Exactly `from..=to`, gaps zero-filled; transactions outside are ignored
    Range { from: Month, to: Month },
}

/// Profit as a percentage of income; zero when there is no income
pub fn margin_pct(profit: Money, income: Money) -> f64 {
    profit.percent_of(income)
}

/// Totals for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub period: Month,
    pub total_income: Money,
    pub total_expense: Money,
    pub profit: Money,
    pub margin_pct: f64,
}

impl MonthlySummary {
    /// A month with no activity
    pub fn empty(period: Month) -> Self {
        Self {
            period,
            total_income: Money::zero(),
            total_expense: Money::zero(),
            profit: Money::zero(),
            margin_pct: 0.0,
        }
    }

    fn record(&mut self, txn: &Transaction) {
        match txn.kind {
            TransactionType::Income => self.total_income += txn.amount,
            TransactionType::Expense => self.total_expense += txn.amount,
        }
        self.profit = self.total_income - self.total_expense;
        self.margin_pct = margin_pct(self.profit, self.total_income);
    }
}

/// Monthly cash flow across a set of transactions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowReport {
    /// Chronological
    pub months: Vec<MonthlySummary>,
    pub total_income: Money,
    pub total_expense: Money,
    pub total_profit: Money,
    pub margin_pct: f64,
}

impl CashFlowReport {
    /// Generate the report over every transaction
    pub fn generate(transactions: &[Transaction], fill: MonthFill) -> Self {
        let mut buckets: BTreeMap<Month, MonthlySummary> = BTreeMap::new();

        let in_range = |month: Month| match fill {
            MonthFill::Range { from, to } => month >= from && month <= to,
            _ => true,
        };

        for txn in transactions.iter().filter(|t| in_range(t.month())) {
            buckets
                .entry(txn.month())
                .or_insert_with(|| MonthlySummary::empty(txn.month()))
                .record(txn);
        }

        let span = match fill {
            MonthFill::Sparse => None,
            MonthFill::Continuous => buckets
                .keys()
                .next()
                .copied()
                .zip(buckets.keys().next_back().copied()),
            MonthFill::Range { from, to } => Some((from, to)),
        };

        if let Some((from, to)) = span {
            for month in from.through(to) {
                buckets
                    .entry(month)
                    .or_insert_with(|| MonthlySummary::empty(month));
            }
        }

        let months: Vec<MonthlySummary> = buckets.into_values().collect();
        let total_income: Money = months.iter().map(|m| m.total_income).sum();
        let total_expense: Money = months.iter().map(|m| m.total_expense).sum();
        let total_profit = total_income - total_expense;

        debug!(months = months.len(), "Generated cash flow report");

        Self {
            months,
            total_income,
            total_expense,
            total_profit,
            margin_pct: margin_pct(total_profit, total_income),
        }
    }

    /// Generate the report over the transactions dated inside `period`
    pub fn for_period(transactions: &[Transaction], period: &Period, fill: MonthFill) -> Self {
        let scoped: Vec<Transaction> = transactions
            .iter()
            .filter(|t| period.contains(t.date))
            .cloned()
            .collect();
        Self::generate(&scoped, fill)
    }

    /// Summary for one month, if present in the sequence
    pub fn get(&self, month: Month) -> Option<&MonthlySummary> {
        self.months.iter().find(|m| m.period == month)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Cash Flow by Month\n");
        output.push_str(&"=".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>15} {:>15} {:>15} {:>10}\n",
            "Month", "Income", "Expenses", "Profit", "Margin"
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        for month in &self.months {
            output.push_str(&format!(
                "{:<10} {:>15} {:>15} {:>15} {:>9.1}%\n",
                month.period.to_string(),
                month.total_income.format_with_symbol(symbol),
                month.total_expense.format_with_symbol(symbol),
                month.profit.format_with_symbol(symbol),
                month.margin_pct
            ));
        }

        output.push_str(&"-".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>15} {:>15} {:>15} {:>9.1}%\n",
            "TOTAL",
            self.total_income.format_with_symbol(symbol),
            self.total_expense.format_with_symbol(symbol),
            self.total_profit.format_with_symbol(symbol),
            self.margin_pct
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FinanceResult<()> {
        let rows = self.months.iter().map(|month| MonthRow {
            month: month.period.to_string(),
            income: month.total_income.to_decimal_string(),
            expenses: month.total_expense.to_decimal_string(),
            profit: month.profit.to_decimal_string(),
            margin: format!("{:.2}", month.margin_pct),
        });
        write_csv_rows(writer, &["Month", "Income", "Expenses", "Profit", "Margin"], rows)
    }
}

#[derive(Serialize)]
struct MonthRow {
    month: String,
    income: String,
    expenses: String,
    profit: String,
    margin: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> Month {
        Month::new(y, m).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::income(date(2024, 1, 5), "Sales", Money::from_dollars(1000)),
            Transaction::expense(date(2024, 1, 20), "Rent", Money::from_dollars(400)),
            Transaction::expense(date(2024, 4, 2), "Software", Money::from_cents(9999)),
            Transaction::income(date(2024, 4, 9), "Sales", Money::from_dollars(250)),
        ]
    }

    #[test]
    fn test_single_month_summary() {
        let txns = &sample()[..2];
        let report = CashFlowReport::generate(txns, MonthFill::Sparse);

        assert_eq!(report.months.len(), 1);
        let jan = report.get(month(2024, 1)).unwrap();
        assert_eq!(jan.total_income, Money::from_dollars(1000));
        assert_eq!(jan.total_expense, Money::from_dollars(400));
        assert_eq!(jan.profit, Money::from_dollars(600));
        assert!((jan.margin_pct - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_sparse_omits_empty_months() {
        let report = CashFlowReport::generate(&sample(), MonthFill::Sparse);
        let periods: Vec<Month> = report.months.iter().map(|m| m.period).collect();
        assert_eq!(periods, vec![month(2024, 1), month(2024, 4)]);
    }

    #[test]
    fn test_continuous_fills_gaps() {
        let report = CashFlowReport::generate(&sample(), MonthFill::Continuous);
        assert_eq!(report.months.len(), 4);
        assert_eq!(report.months[1], MonthlySummary::empty(month(2024, 2)));
        assert_eq!(report.months[2], MonthlySummary::empty(month(2024, 3)));
    }

    #[test]
    fn test_range_fill_clips_and_pads() {
        let fill = MonthFill::Range {
            from: month(2023, 12),
            to: month(2024, 2),
        };
        let report = CashFlowReport::generate(&sample(), fill);

        assert_eq!(report.months.len(), 3);
        assert_eq!(report.months[0].period, month(2023, 12));
        assert_eq!(report.total_income, Money::from_dollars(1000));
    }

    #[test]
    fn test_profit_sum_matches_income_minus_expense() {
        let txns = sample();
        let report = CashFlowReport::generate(&txns, MonthFill::Continuous);

        let income: Money = txns.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
        let expense: Money = txns.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();
        let profit_sum: Money = report.months.iter().map(|m| m.profit).sum();

        assert_eq!(profit_sum, income - expense);
        assert_eq!(report.total_profit, income - expense);
    }

    #[test]
    fn test_zero_income_margin_is_zero() {
        let txns = vec![Transaction::expense(
            date(2024, 3, 1),
            "Rent",
            Money::from_dollars(400),
        )];
        let report = CashFlowReport::generate(&txns, MonthFill::Sparse);

        assert_eq!(report.months[0].profit, Money::from_dollars(-400));
        assert_eq!(report.months[0].margin_pct, 0.0);
        assert_eq!(report.margin_pct, 0.0);
    }

    #[test]
    fn test_empty_input() {
        let report = CashFlowReport::generate(&[], MonthFill::Continuous);
        assert!(report.months.is_empty());
        assert!(report.total_profit.is_zero());
    }

    #[test]
    fn test_for_period() {
        let period = Period::month(2024, 4).unwrap();
        let report = CashFlowReport::for_period(&sample(), &period, MonthFill::Sparse);
        assert_eq!(report.months.len(), 1);
        assert_eq!(report.total_income, Money::from_dollars(250));
    }

    #[test]
    fn test_export_csv() {
        let report = CashFlowReport::generate(&sample()[..2], MonthFill::Sparse);
        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();

        let csv = String::from_utf8(out).unwrap();
        assert!(csv.starts_with("Month,Income,Expenses,Profit,Margin\n"));
        assert!(csv.contains("2024-01,1000.00,400.00,600.00,60.00"));
    }

    #[test]
    fn test_huge_totals_saturate() {
        let huge = Money::from_cents(i64::MAX / 2 + 1);
        let txns = vec![
            Transaction::income(date(2024, 1, 5), "Sales", huge),
            Transaction::income(date(2024, 1, 6), "Sales", huge),
        ];
        let report = CashFlowReport::generate(&txns, MonthFill::Sparse);
        assert_eq!(report.total_income.cents(), i64::MAX);
        assert_eq!(report.months[0].profit.cents(), i64::MAX);
    }
}
