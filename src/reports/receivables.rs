//! Invoice status engine and receivables KPIs
//!
//! Statuses other than Paid are re-derived from the invoice dates against an
//! explicit reference date. Paid is only ever set by the user.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::write_csv_rows;
use crate::error::FinanceResult;
use crate::models::{ClientInvoice, InvoiceStatus, Money};

/// Status an invoice should carry as of `today`
pub fn classify(invoice: &ClientInvoice, today: NaiveDate) -> InvoiceStatus {
    if invoice.status == InvoiceStatus::Paid {
        InvoiceStatus::Paid
    } else if today > invoice.due_date {
        InvoiceStatus::Overdue
    } else if today >= invoice.invoice_sent_date {
        InvoiceStatus::Due
    } else {
        InvoiceStatus::Sent
    }
}

/// Copy of `invoice` with its status re-derived as of `today`
pub fn reclassify(invoice: &ClientInvoice, today: NaiveDate) -> ClientInvoice {
    ClientInvoice {
        status: classify(invoice, today),
        ..invoice.clone()
    }
}

/// Reclassify every invoice as of `today`
pub fn reclassify_all(invoices: &[ClientInvoice], today: NaiveDate) -> Vec<ClientInvoice> {
    invoices.iter().map(|i| reclassify(i, today)).collect()
}

/// Receivables for one client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientKpi {
    pub client: String,
    pub total_invoiced: Money,
    pub total_paid: Money,
    /// Sent + Due + Overdue
    pub total_outstanding: Money,
    pub count_overdue: usize,
}

impl ClientKpi {
    fn new(client: &str) -> Self {
        Self {
            client: client.to_string(),
            total_invoiced: Money::zero(),
            total_paid: Money::zero(),
            total_outstanding: Money::zero(),
            count_overdue: 0,
        }
    }

    fn record(&mut self, invoice: &ClientInvoice) {
        self.total_invoiced += invoice.amount;
        if invoice.status.is_outstanding() {
            self.total_outstanding += invoice.amount;
        } else {
            self.total_paid += invoice.amount;
        }
        if invoice.status == InvoiceStatus::Overdue {
            self.count_overdue += 1;
        }
    }
}

/// Number of invoices in each status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub sent: usize,
    pub due: usize,
    pub paid: usize,
    pub overdue: usize,
}

impl StatusCounts {
    fn record(&mut self, status: InvoiceStatus) {
        match status {
            InvoiceStatus::Sent => self.sent += 1,
            InvoiceStatus::Due => self.due += 1,
            InvoiceStatus::Paid => self.paid += 1,
            InvoiceStatus::Overdue => self.overdue += 1,
        }
    }

    pub fn get(&self, status: InvoiceStatus) -> usize {
        match status {
            InvoiceStatus::Sent => self.sent,
            InvoiceStatus::Due => self.due,
            InvoiceStatus::Paid => self.paid,
            InvoiceStatus::Overdue => self.overdue,
        }
    }
}

/// Receivables across all clients as of a reference date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceivablesReport {
    pub as_of: NaiveDate,
    /// Reclassified invoices, in input order
    pub invoices: Vec<ClientInvoice>,
    /// Sorted by client name
    pub clients: Vec<ClientKpi>,
    pub total_invoiced: Money,
    pub total_outstanding: Money,
    pub count_overdue: usize,
    pub overdue_amount: Money,
    pub status_counts: StatusCounts,
    /// Earliest due date first; ties go to the larger amount
    pub oldest_overdue: Option<ClientInvoice>,
}

impl ReceivablesReport {
    /// Reclassify `invoices` as of `today` and compute the KPIs
    pub fn generate(invoices: &[ClientInvoice], today: NaiveDate) -> Self {
        let invoices = reclassify_all(invoices, today);

        let mut by_client: BTreeMap<&str, ClientKpi> = BTreeMap::new();
        let mut status_counts = StatusCounts::default();
        for invoice in &invoices {
            by_client
                .entry(invoice.client.as_str())
                .or_insert_with(|| ClientKpi::new(&invoice.client))
                .record(invoice);
            status_counts.record(invoice.status);
        }
        let clients: Vec<ClientKpi> = by_client.into_values().collect();

        let overdue: Vec<&ClientInvoice> = invoices
            .iter()
            .filter(|i| i.status == InvoiceStatus::Overdue)
            .collect();
        let count_overdue = overdue.len();
        let overdue_amount: Money = overdue.iter().map(|i| i.amount).sum();
        let oldest_overdue = overdue
            .iter()
            .min_by(|a, b| {
                a.due_date
                    .cmp(&b.due_date)
                    .then_with(|| b.amount.cmp(&a.amount))
            })
            .map(|i| (*i).clone());

        let total_invoiced = clients.iter().map(|c| c.total_invoiced).sum();
        let total_outstanding = clients.iter().map(|c| c.total_outstanding).sum();

        debug!(
            invoices = invoices.len(),
            overdue = count_overdue,
            "Generated receivables report"
        );

        Self {
            as_of: today,
            invoices,
            clients,
            total_invoiced,
            total_outstanding,
            count_overdue,
            overdue_amount,
            status_counts,
            oldest_overdue,
        }
    }

    pub fn client(&self, name: &str) -> Option<&ClientKpi> {
        self.clients.iter().find(|c| c.client == name)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Receivables as of {}\n", self.as_of));
        output.push_str(&"=".repeat(78));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>14} {:>14} {:>14} {:>8}\n",
            "Client", "Invoiced", "Paid", "Outstanding", "Overdue"
        ));
        output.push_str(&"-".repeat(78));
        output.push('\n');

        for kpi in &self.clients {
            output.push_str(&format!(
                "{:<24} {:>14} {:>14} {:>14} {:>8}\n",
                kpi.client,
                kpi.total_invoiced.format_with_symbol(symbol),
                kpi.total_paid.format_with_symbol(symbol),
                kpi.total_outstanding.format_with_symbol(symbol),
                kpi.count_overdue
            ));
        }

        output.push_str(&"-".repeat(78));
        output.push('\n');
        output.push_str(&format!(
            "Total outstanding: {}\n",
            self.total_outstanding.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Overdue: {} invoice(s), {}\n",
            self.count_overdue,
            self.overdue_amount.format_with_symbol(symbol)
        ));

        if let Some(oldest) = &self.oldest_overdue {
            output.push_str(&format!(
                "Most urgent: {} / {} {} ({} days overdue)\n",
                oldest.client,
                oldest.project,
                oldest.amount.format_with_symbol(symbol),
                oldest.days_overdue(self.as_of)
            ));
        }

        output
    }

    /// Export the per-client KPIs to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FinanceResult<()> {
        let rows = self.clients.iter().map(|kpi| ClientRow {
            client: &kpi.client,
            invoiced: kpi.total_invoiced.to_decimal_string(),
            paid: kpi.total_paid.to_decimal_string(),
            outstanding: kpi.total_outstanding.to_decimal_string(),
            overdue_count: kpi.count_overdue,
        });
        write_csv_rows(
            writer,
            &["Client", "Invoiced", "Paid", "Outstanding", "Overdue Count"],
            rows,
        )
    }
}

#[derive(Serialize)]
struct ClientRow<'a> {
    client: &'a str,
    invoiced: String,
    paid: String,
    outstanding: String,
    overdue_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice(
        client: &str,
        amount: i64,
        sent: NaiveDate,
        due: NaiveDate,
        status: InvoiceStatus,
    ) -> ClientInvoice {
        ClientInvoice::new(client, "Project", Money::from_dollars(amount), sent, due, status)
    }

    #[test]
    fn test_due_invoice_becomes_overdue() {
        let inv = invoice(
            "ABC Corp",
            1000,
            date(2024, 1, 1),
            date(2024, 1, 31),
            InvoiceStatus::Due,
        );
        assert_eq!(classify(&inv, date(2024, 2, 15)), InvoiceStatus::Overdue);
    }

    #[test]
    fn test_classification_windows() {
        let inv = invoice(
            "ABC Corp",
            1000,
            date(2024, 1, 10),
            date(2024, 1, 31),
            InvoiceStatus::Sent,
        );

        assert_eq!(classify(&inv, date(2024, 1, 9)), InvoiceStatus::Sent);
        assert_eq!(classify(&inv, date(2024, 1, 10)), InvoiceStatus::Due);
        assert_eq!(classify(&inv, date(2024, 1, 31)), InvoiceStatus::Due);
        assert_eq!(classify(&inv, date(2024, 2, 1)), InvoiceStatus::Overdue);
    }

    #[test]
    fn test_paid_is_never_reclassified() {
        let inv = invoice(
            "ABC Corp",
            8000,
            date(2024, 1, 10),
            date(2024, 2, 10),
            InvoiceStatus::Paid,
        );
        for today in [date(2023, 1, 1), date(2024, 1, 20), date(2030, 1, 1)] {
            assert_eq!(classify(&inv, today), InvoiceStatus::Paid);
        }
    }

    #[test]
    fn test_overdue_can_return_to_due_when_reference_moves_back() {
        let inv = invoice(
            "XYZ Inc",
            500,
            date(2024, 1, 1),
            date(2024, 1, 31),
            InvoiceStatus::Overdue,
        );
        assert_eq!(classify(&inv, date(2024, 1, 15)), InvoiceStatus::Due);
    }

    #[test]
    fn test_reclassify_is_idempotent() {
        let today = date(2024, 2, 20);
        let invoices = vec![
            invoice("A", 100, date(2024, 1, 1), date(2024, 1, 31), InvoiceStatus::Due),
            invoice("B", 200, date(2024, 2, 1), date(2024, 3, 1), InvoiceStatus::Sent),
            invoice("C", 300, date(2024, 3, 1), date(2024, 4, 1), InvoiceStatus::Due),
            invoice("D", 400, date(2024, 1, 1), date(2024, 1, 5), InvoiceStatus::Paid),
        ];

        let once = reclassify_all(&invoices, today);
        let twice = reclassify_all(&once, today);
        assert_eq!(once, twice);

        let statuses: Vec<InvoiceStatus> = once.iter().map(|i| i.status).collect();
        assert_eq!(
            statuses,
            vec![
                InvoiceStatus::Overdue,
                InvoiceStatus::Due,
                InvoiceStatus::Sent,
                InvoiceStatus::Paid
            ]
        );
    }

    #[test]
    fn test_client_kpis() {
        let invoices = vec![
            invoice("ABC Corp", 8000, date(2024, 1, 10), date(2024, 2, 10), InvoiceStatus::Paid),
            invoice("XYZ Inc", 12000, date(2024, 1, 15), date(2024, 2, 15), InvoiceStatus::Due),
            invoice("StartupCo", 5000, date(2024, 2, 1), date(2024, 3, 1), InvoiceStatus::Sent),
            invoice("ABC Corp", 1500, date(2024, 1, 1), date(2024, 1, 20), InvoiceStatus::Sent),
        ];
        let report = ReceivablesReport::generate(&invoices, date(2024, 2, 20));

        let abc = report.client("ABC Corp").unwrap();
        assert_eq!(abc.total_invoiced, Money::from_dollars(9500));
        assert_eq!(abc.total_paid, Money::from_dollars(8000));
        assert_eq!(abc.total_outstanding, Money::from_dollars(1500));
        assert_eq!(abc.count_overdue, 1);

        assert_eq!(report.total_invoiced, Money::from_dollars(26500));
        assert_eq!(report.total_outstanding, Money::from_dollars(18500));
        assert_eq!(report.count_overdue, 2);
        assert_eq!(report.overdue_amount, Money::from_dollars(13500));
        assert_eq!(report.status_counts.get(InvoiceStatus::Due), 1);
        assert_eq!(report.status_counts.get(InvoiceStatus::Paid), 1);

        let clients: Vec<&str> = report.clients.iter().map(|c| c.client.as_str()).collect();
        assert_eq!(clients, vec!["ABC Corp", "StartupCo", "XYZ Inc"]);
    }

    #[test]
    fn test_oldest_overdue_tie_breaks_on_amount() {
        let due = date(2024, 1, 31);
        let invoices = vec![
            invoice("Small", 100, date(2024, 1, 1), due, InvoiceStatus::Due),
            invoice("Large", 900, date(2024, 1, 1), due, InvoiceStatus::Due),
            invoice("Later", 5000, date(2024, 1, 1), date(2024, 2, 5), InvoiceStatus::Due),
        ];
        let report = ReceivablesReport::generate(&invoices, date(2024, 3, 1));

        let oldest = report.oldest_overdue.unwrap();
        assert_eq!(oldest.client, "Large");
    }

    #[test]
    fn test_no_overdue() {
        let invoices = vec![invoice(
            "ABC Corp",
            100,
            date(2024, 1, 1),
            date(2024, 1, 31),
            InvoiceStatus::Sent,
        )];
        let report = ReceivablesReport::generate(&invoices, date(2024, 1, 15));

        assert!(report.oldest_overdue.is_none());
        assert!(report.overdue_amount.is_zero());
        assert_eq!(report.total_outstanding, Money::from_dollars(100));
    }

    #[test]
    fn test_export_csv_quotes_client_names() {
        let invoices = vec![invoice(
            "Smith, Jones & Co",
            500,
            date(2024, 1, 1),
            date(2024, 1, 31),
            InvoiceStatus::Paid,
        )];
        let report = ReceivablesReport::generate(&invoices, date(2024, 2, 1));
        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();

        let mut reader = csv::Reader::from_reader(out.as_slice());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 5);
        assert_eq!(&rows[0][0], "Smith, Jones & Co");
        assert_eq!(&rows[0][2], "500.00");
    }
}
