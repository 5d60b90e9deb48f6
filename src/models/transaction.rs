//! Transaction model
//!
//! A dated income or expense entry. Amounts are always non-negative; the
//! transaction type decides which side of the ledger an amount lands on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::period::Month;

/// Whether a transaction brings money in or sends it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [Self::Income, Self::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// Case-insensitive match against the canonical names
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub category: String,

    /// Non-negative amount
    pub amount: Money,

    #[serde(default)]
    pub description: String,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        date: NaiveDate,
        kind: TransactionType,
        category: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            date,
            kind,
            category: category.into(),
            amount,
            description: String::new(),
        }
    }

    pub fn income(date: NaiveDate, category: impl Into<String>, amount: Money) -> Self {
        Self::new(date, TransactionType::Income, category, amount)
    }

    pub fn expense(date: NaiveDate, category: impl Into<String>, amount: Money) -> Self {
        Self::new(date, TransactionType::Expense, category, amount)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// The (year, month) bucket this transaction rolls up into
    pub fn month(&self) -> Month {
        Month::of(self.date)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.category,
            self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_case_insensitive() {
        assert_eq!(TransactionType::parse("income"), Some(TransactionType::Income));
        assert_eq!(TransactionType::parse(" EXPENSE "), Some(TransactionType::Expense));
        assert_eq!(TransactionType::parse("refund"), None);
    }

    #[test]
    fn test_constructors() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let txn = Transaction::income(date, "Sales", Money::from_dollars(1000))
            .with_description("Project Alpha");

        assert!(txn.is_income());
        assert!(!txn.is_expense());
        assert_eq!(txn.month(), Month::new(2024, 1).unwrap());
        assert_eq!(txn.description, "Project Alpha");
    }

    #[test]
    fn test_display() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let txn = Transaction::expense(date, "Rent", Money::from_dollars(400));
        assert_eq!(txn.to_string(), "2024-01-20 Expense Rent $400.00");
    }

    #[test]
    fn test_serialization() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let txn = Transaction::expense(date, "Rent", Money::from_dollars(400));
        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"type\":\"Expense\""));

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, txn);
    }
}
