//! Income allocation
//!
//! Splits a period's income into tax, reinvestment, owner pay and the net
//! cushion that is left over. The cushion is whatever remains after the
//! other three, so the four parts always add back to the income exactly. A
//! negative cushion is a valid result: it means the policy pays out more
//! than the period earned.

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use super::spending::{CategoryBreakdown, CategoryShare};
use super::write_csv_rows;
use crate::error::FinanceResult;
use crate::models::{AllocationPolicy, Money, Period, Transaction};

/// Income split under an allocation policy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationResult {
    pub period: Period,
    pub income: Money,
    pub tax: Money,
    pub reinvestment: Money,
    pub owner_pay: Money,
    /// Whole owner pay intervals elapsed in the period
    pub pay_cycles: i64,
    pub net_cushion: Money,
    /// Income by category; empty when only a total was supplied
    pub income_sources: Vec<CategoryShare>,
}

impl AllocationResult {
    /// Allocate a known income total over `period`
    pub fn calculate(income: Money, period: &Period, policy: &AllocationPolicy) -> Self {
        let pay_cycles = pay_cycles(period, policy);
        let tax = income.apply_rate(policy.tax_rate());
        let reinvestment = income.apply_rate(policy.reinvestment_rate());
        let owner_pay = policy.owner_pay_amount() * pay_cycles;
        let net_cushion = income - tax - reinvestment - owner_pay;

        debug!(
            period = %period,
            income = %income,
            pay_cycles,
            net_cushion = %net_cushion,
            "Calculated allocation"
        );

        Self {
            period: *period,
            income,
            tax,
            reinvestment,
            owner_pay,
            pay_cycles,
            net_cushion,
            income_sources: Vec::new(),
        }
    }

    /// Allocate the income transactions dated inside `period`
    pub fn from_transactions(
        transactions: &[Transaction],
        period: &Period,
        policy: &AllocationPolicy,
    ) -> Self {
        let sources = CategoryBreakdown::income_sources(transactions, Some(period));
        let mut result = Self::calculate(sources.total, period, policy);
        result.income_sources = sources.categories;
        result
    }

    /// Whether the policy pays out more than the period earned
    pub fn is_unsustainable(&self) -> bool {
        self.net_cushion.is_negative()
    }

    /// Format the allocation for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Income Allocation: {}\n", self.period));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        let rows = [
            ("Income", self.income),
            ("Tax", self.tax),
            ("Reinvestment", self.reinvestment),
            ("Owner Pay", self.owner_pay),
        ];
        for (label, amount) in rows {
            output.push_str(&format!(
                "{:<30} {:>18}\n",
                label,
                amount.format_with_symbol(symbol)
            ));
        }
        output.push_str(&format!("{:<30} {:>18}\n", "Pay Cycles", self.pay_cycles));
        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>18}\n",
            "Net Cushion",
            self.net_cushion.format_with_symbol(symbol)
        ));

        if self.is_unsustainable() {
            output.push_str("\nWarning: allocations exceed income for this period\n");
        }

        if !self.income_sources.is_empty() {
            output.push_str("\nIncome Sources\n");
            for source in &self.income_sources {
                output.push_str(&format!(
                    "  {:<28} {:>14} {:>5.1}%\n",
                    source.category,
                    source.total_amount.format_with_symbol(symbol),
                    source.percentage
                ));
            }
        }

        output
    }

    /// Export the allocation to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FinanceResult<()> {
        let period = self.period.to_string();
        let rows = [
            ("Income", self.income),
            ("Tax", self.tax),
            ("Reinvestment", self.reinvestment),
            ("Owner Pay", self.owner_pay),
            ("Net Cushion", self.net_cushion),
        ]
        .map(|(bucket, amount)| (period.as_str(), bucket, amount.to_decimal_string()));
        write_csv_rows(writer, &["Period", "Bucket", "Amount"], rows)
    }
}

/// Owner pay intervals completed within `period`, partial intervals dropped
pub fn pay_cycles(period: &Period, policy: &AllocationPolicy) -> i64 {
    period.days() / i64::from(policy.owner_pay_interval_days())
}
