//! Sample data for a fresh install
//!
//! Only `bizdash init --sample` calls into this module; the engine never
//! substitutes sample records for missing data.

use chrono::NaiveDate;

use crate::models::{
    ClientInvoice, DueMonth, InvoiceStatus, Money, RecordSet, RecurringExpense, Transaction,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn january() -> DueMonth {
    DueMonth::of(date(2024, 1, 1))
}

pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction::income(date(2024, 1, 15), "Client Work", Money::from_dollars(5000))
            .with_description("Project Alpha"),
        Transaction::expense(date(2024, 1, 20), "Software", Money::from_dollars(99))
            .with_description("Adobe Creative"),
        Transaction::income(date(2024, 1, 25), "Digital Store", Money::from_dollars(1200))
            .with_description("E-book Sales"),
        Transaction::expense(date(2024, 2, 1), "Meals", Money::from_dollars(45))
            .with_description("Business Lunch"),
        Transaction::expense(date(2024, 2, 5), "Subscriptions", Money::from_cents(2999))
            .with_description("Netflix"),
    ]
}

pub fn sample_invoices() -> Vec<ClientInvoice> {
    vec![
        ClientInvoice::new(
            "ABC Corp",
            "Website Redesign",
            Money::from_dollars(8000),
            date(2024, 1, 10),
            date(2024, 2, 10),
            InvoiceStatus::Paid,
        ),
        ClientInvoice::new(
            "XYZ Inc",
            "Mobile App",
            Money::from_dollars(12000),
            date(2024, 1, 15),
            date(2024, 2, 15),
            InvoiceStatus::Due,
        ),
        ClientInvoice::new(
            "StartupCo",
            "Consulting",
            Money::from_dollars(5000),
            date(2024, 2, 1),
            date(2024, 3, 1),
            InvoiceStatus::Sent,
        ),
    ]
}

pub fn sample_recurring() -> Vec<RecurringExpense> {
    vec![
        RecurringExpense::monthly("Adobe", Money::from_dollars(99)).with_notes("Creative Suite"),
        RecurringExpense::annual("Microsoft", Money::from_dollars(1200), january())
            .with_notes("Office 365"),
        RecurringExpense::monthly("AWS", Money::from_dollars(50)).with_notes("Cloud hosting"),
        RecurringExpense::annual("Insurance", Money::from_dollars(2400), january())
            .with_notes("Business insurance"),
    ]
}

/// The full sample data set
pub fn sample_records() -> RecordSet {
    RecordSet {
        transactions: sample_transactions(),
        invoices: sample_invoices(),
        recurring: sample_recurring(),
    }
}
