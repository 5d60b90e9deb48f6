//! Client invoice model
//!
//! An invoice moves Sent -> Due -> Overdue as time passes; Paid is terminal
//! and only reachable by explicit user action.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    /// Issued but not yet in its payment window
    Sent,
    /// Inside the payment window
    Due,
    /// Settled; never reclassified by date
    Paid,
    /// Past the due date and unpaid
    Overdue,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 4] = [Self::Sent, Self::Due, Self::Paid, Self::Overdue];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "Sent",
            Self::Due => "Due",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
        }
    }

    /// Case-insensitive match against the canonical names
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid)
    }

    /// Whether the amount still counts as receivable
    pub fn is_outstanding(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A client invoice
///
/// `due_date >= invoice_sent_date` holds for every invoice that passed
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInvoice {
    pub client: String,
    pub project: String,
    pub amount: Money,
    pub invoice_sent_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
}

impl ClientInvoice {
    pub fn new(
        client: impl Into<String>,
        project: impl Into<String>,
        amount: Money,
        invoice_sent_date: NaiveDate,
        due_date: NaiveDate,
        status: InvoiceStatus,
    ) -> Self {
        Self {
            client: client.into(),
            project: project.into(),
            amount,
            invoice_sent_date,
            due_date,
            status,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status.is_terminal()
    }

    /// Days past due as of `today`; zero when not yet due
    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        (today - self.due_date).num_days().max(0)
    }
}

impl fmt::Display for ClientInvoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} {} due {} ({})",
            self.client,
            self.project,
            self.amount,
            self.due_date.format("%Y-%m-%d"),
            self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(InvoiceStatus::parse("overdue"), Some(InvoiceStatus::Overdue));
        assert_eq!(InvoiceStatus::parse("PAID"), Some(InvoiceStatus::Paid));
        assert_eq!(InvoiceStatus::parse("pending"), None);
    }

    #[test]
    fn test_outstanding() {
        assert!(InvoiceStatus::Sent.is_outstanding());
        assert!(InvoiceStatus::Due.is_outstanding());
        assert!(InvoiceStatus::Overdue.is_outstanding());
        assert!(!InvoiceStatus::Paid.is_outstanding());
    }

    #[test]
    fn test_days_overdue() {
        let sent = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let due = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let invoice = ClientInvoice::new(
            "ABC Corp",
            "Website",
            Money::from_dollars(8000),
            sent,
            due,
            InvoiceStatus::Due,
        );

        assert_eq!(invoice.days_overdue(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()), 15);
        assert_eq!(invoice.days_overdue(sent), 0);
    }
}
