//! Category breakdown
//!
//! Splits expenses (or income) by category with each category's share of
//! the total.

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;
use tracing::debug;

use super::write_csv_rows;
use crate::error::FinanceResult;
use crate::models::{Money, Period, Transaction, TransactionType};

/// One category's total and share
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total_amount: Money,
    pub transaction_count: usize,
    /// Share of the breakdown total, 0-100
    pub percentage: f64,
}

/// Totals per category for one side of the ledger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub kind: TransactionType,
    /// Largest first; ties ordered by name
    pub categories: Vec<CategoryShare>,
    pub total: Money,
}

impl CategoryBreakdown {
    /// Break down the transactions of `kind`, optionally scoped to `period`
    ///
    /// Percentages are all zero when the total is zero.
    pub fn generate(
        transactions: &[Transaction],
        kind: TransactionType,
        period: Option<&Period>,
    ) -> Self {
        let mut by_category: HashMap<&str, (Money, usize)> = HashMap::new();
        let mut total = Money::zero();

        for txn in transactions
            .iter()
            .filter(|t| t.kind == kind)
            .filter(|t| period.map_or(true, |p| p.contains(t.date)))
        {
            let entry = by_category
                .entry(txn.category.as_str())
                .or_insert((Money::zero(), 0));
            entry.0 += txn.amount;
            entry.1 += 1;
            total += txn.amount;
        }

        let mut categories: Vec<CategoryShare> = by_category
            .into_iter()
            .map(|(category, (amount, count))| CategoryShare {
                category: category.to_string(),
                total_amount: amount,
                transaction_count: count,
                percentage: amount.percent_of(total),
            })
            .collect();

        categories.sort_by(|a, b| {
            b.total_amount
                .cmp(&a.total_amount)
                .then_with(|| a.category.cmp(&b.category))
        });

        debug!(kind = %kind, categories = categories.len(), "Generated category breakdown");

        Self {
            kind,
            categories,
            total,
        }
    }

    /// Expense categories and their share of total expense
    pub fn expenses(transactions: &[Transaction], period: Option<&Period>) -> Self {
        Self::generate(transactions, TransactionType::Expense, period)
    }

    /// Income sources and their share of total income
    pub fn income_sources(transactions: &[Transaction], period: Option<&Period>) -> Self {
        Self::generate(transactions, TransactionType::Income, period)
    }

    pub fn get(&self, category: &str) -> Option<&CategoryShare> {
        self.categories.iter().find(|c| c.category == category)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Top `limit` categories by amount
    pub fn top(&self, limit: usize) -> &[CategoryShare] {
        &self.categories[..limit.min(self.categories.len())]
    }

    /// Format the breakdown for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let title = match self.kind {
            TransactionType::Expense => "Expenses by Category",
            TransactionType::Income => "Income by Source",
        };

        let mut output = String::new();
        output.push_str(title);
        output.push('\n');
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>14} {:>6} {:>7}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for share in &self.categories {
            output.push_str(&format!(
                "{:<30} {:>14} {:>6} {:>6.1}%\n",
                share.category,
                share.total_amount.format_with_symbol(symbol),
                share.transaction_count,
                share.percentage
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>14}\n",
            "TOTAL",
            self.total.format_with_symbol(symbol)
        ));

        output
    }

    /// Export the breakdown to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FinanceResult<()> {
        let rows = self.categories.iter().map(|share| CategoryRow {
            category: &share.category,
            amount: share.total_amount.to_decimal_string(),
            transaction_count: share.transaction_count,
            percentage: format!("{:.2}", share.percentage),
        });
        write_csv_rows(writer, &["Category", "Amount", "Transaction Count", "Percentage"], rows)
    }
}

#[derive(Serialize)]
struct CategoryRow<'a> {
    category: &'a str,
    amount: String,
    transaction_count: usize,
    percentage: String,
}
